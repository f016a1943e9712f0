pub mod header;
pub mod practice;
pub mod prompt;
pub mod quiz;
pub mod timeline;
pub mod vocab;
