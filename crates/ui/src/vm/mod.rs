mod quiz_vm;

pub use quiz_vm::{
    QuizIntent, option_letter, page_label, progress_label, progress_percent, score_label,
    timer_label,
};
