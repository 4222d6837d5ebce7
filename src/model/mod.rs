mod declaration;
mod record;

pub use declaration::{MethodDeclaration, Parameter, TypeReference};
pub use record::{ApiChangeDocument, ApiChangeRecord, ClassLabel, DataDescriptor, Destination};
