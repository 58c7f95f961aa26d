use chrono::NaiveDate;
use shared::{shift_months, MonthGrid};
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::services::date_utils;

/// Navigation state shared by the person calendar and the unit matrix.
#[derive(Clone, PartialEq)]
pub struct MonthState {
    pub reference: NaiveDate,
    pub grid: MonthGrid,
}

#[derive(Clone, PartialEq)]
pub struct UseMonthActions {
    pub prev_month: Callback<MouseEvent>,
    pub next_month: Callback<MouseEvent>,
}

pub struct UseMonthResult {
    pub state: MonthState,
    pub actions: UseMonthActions,
}

/// Reference-date state starting at today, with ±1 month navigation.
#[hook]
pub fn use_month() -> UseMonthResult {
    let reference = use_state(date_utils::today);

    let prev_month = use_callback(reference.clone(), |_: MouseEvent, reference| {
        reference.set(shift_months(**reference, -1));
    });

    let next_month = use_callback(reference.clone(), |_: MouseEvent, reference| {
        reference.set(shift_months(**reference, 1));
    });

    UseMonthResult {
        state: MonthState {
            reference: *reference,
            grid: MonthGrid::containing(*reference),
        },
        actions: UseMonthActions {
            prev_month,
            next_month,
        },
    }
}
