//! 배치 일정(월별 배치율 델타) 누적/편집.

pub mod schedule;

pub use schedule::{
    apply_batch_edit, apply_edit, cumulative_at, cumulative_before, delivery_date, ScheduleError,
};
