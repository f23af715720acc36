pub mod d400_dashboard;
pub mod d401_notifications;
pub mod d402_reports;
pub mod d403_timeline;
pub mod d404_calendar;
