pub mod command;
pub mod exam_flow;
pub mod lookup_flow;

pub use command::{parse_command, Command};
pub use exam_flow::{ExamFlow, ExamReport, GeneratedExam};
pub use lookup_flow::{format_reply, LookupFlow, LookupOutcome};
