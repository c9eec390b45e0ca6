pub mod connect;
pub mod functions;
pub mod iam;

pub use connect::RegionConnector;
pub use functions::FunctionLister;
pub use iam::IamReader;
