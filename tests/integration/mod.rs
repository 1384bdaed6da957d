/// Integration tests against on-disk SQLite databases and the tokio scheduler
mod persistence;
mod reminders;
