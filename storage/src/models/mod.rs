mod memory_record;

pub use memory_record::{parse_instant, MemoryRecord};
