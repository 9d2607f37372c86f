pub mod phrase_data;
