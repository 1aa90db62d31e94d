pub mod exercise_card;
pub mod lesson_list;
pub mod phrase_list;
pub mod tab_bar;
pub mod vocab_grid;
