mod error;

pub mod pdb;

pub use pdb::reader::{parse_line, read as read_records};
pub use pdb::writer::{serialize_record, write as write_records, write_pose_files};

pub use error::Error;
