pub mod preview;
pub mod storage;
