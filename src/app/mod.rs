// Application layer: one function per command, each driving an InventoryStore.

pub mod commands;
