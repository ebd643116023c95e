mod db;
mod rocks;
mod snapshot;


pub use db::*;
pub use snapshot::*;
