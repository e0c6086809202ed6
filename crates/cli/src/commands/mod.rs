pub mod edit;
pub mod init;
pub mod nodes;
pub mod tree;
pub mod util;

pub use edit::*;
pub use init::*;
pub use nodes::*;
pub use tree::*;
pub use util::*;
