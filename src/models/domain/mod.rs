pub mod certificate;
pub mod question_record;
pub mod session;
pub use certificate::Certificate;
pub use question_record::{OptionKey, QuestionRecord, Topic};
pub use session::{Session, SessionState};
