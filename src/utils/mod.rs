pub mod manifest;
pub mod path_validator;
pub mod substitution;
