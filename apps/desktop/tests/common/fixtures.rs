//! Test data builders.

use flashdeck_core::types::{AnswerDraft, FlashcardDraft};

/// `i+i=?` with the right sum and one wrong option.
pub fn addition_card(i: usize) -> FlashcardDraft {
    FlashcardDraft::new(
        format!("{i}+{i}=?"),
        vec![
            AnswerDraft::incorrect((i * 2 + 1).to_string()),
            AnswerDraft::correct((i * 2).to_string()),
        ],
    )
}

/// Import text mixing valid, duplicate and malformed lines.
pub fn mixed_import() -> &'static str {
    "Math@next@2+2=?@next@3@next@@correct@4@end@\n\
     \n\
     Geography@next@Capital of France?@next@@correct@Paris@next@Lyon@end@\n\
     math@next@2+2=?@next@@correct@4@end@\n\
     Broken line without terminator\n\
     @next@No category@next@@correct@x@end@\n\
     Math@next@3+3=?@next@5@next@7@end@\n"
}
