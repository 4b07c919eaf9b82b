mod file;
mod memory;

pub use file::{default_data_dir, FileSlot};
pub use memory::MemorySlot;
