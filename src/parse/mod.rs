pub mod mapping_line;
pub mod rule_line;
pub mod source;
