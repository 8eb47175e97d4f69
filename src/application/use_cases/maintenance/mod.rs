pub mod wipe_all_data;
