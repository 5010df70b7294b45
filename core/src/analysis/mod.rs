pub use connectivity::*;

mod connectivity;
