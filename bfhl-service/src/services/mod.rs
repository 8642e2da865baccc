pub mod dispatcher;
pub mod error;
pub mod math;
pub mod metrics;
pub mod operation;
pub mod providers;

pub use dispatcher::Dispatcher;
pub use error::DispatchError;
pub use self::metrics::{get_metrics, init_metrics};
pub use operation::{Operation, OperationOutput};
