pub mod fetch_result;
pub mod file_descriptor;
pub mod key_id;
pub mod key_record;
pub mod verification;
