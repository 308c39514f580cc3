

pub mod composer;
pub mod responses;

pub use composer::ReplyComposer;
pub use responses::ResponseTable;
