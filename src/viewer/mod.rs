pub mod assembler;
pub mod navigation;
pub mod service;
pub mod timelapse;
