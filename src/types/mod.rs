pub mod bounds;
pub mod field;
pub mod field_value;
pub mod raw_reading;
pub mod summary;
