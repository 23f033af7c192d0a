//! Service tests and the in-memory collaborators they run against.


mod calendar;
