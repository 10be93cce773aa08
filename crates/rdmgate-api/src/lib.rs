// rdmgate-api: RDM transaction-client contract and parameter types

pub mod command;
pub mod error;
pub mod payload;
pub mod pid;
pub mod sim;
pub mod status;
pub mod text;
pub mod transport;
pub mod uid;

pub use command::{RdmCommand, Transaction};
pub use error::Error;
pub use payload::{DeviceDescriptor, RdmPayload, SensorDescriptor, SensorReading};
pub use pid::Pid;
pub use sim::{DeviceFixture, Fixture, SimulatedBus};
pub use status::{NackReason, ResponseStatus, ResponseType};
pub use transport::{Completion, RdmTransport, Token};
pub use uid::Uid;
