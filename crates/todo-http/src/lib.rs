pub mod http;

pub use http::{Operation, TodoClient};
pub use http::{cli, client, common, error};
pub use todo::telemetry;
