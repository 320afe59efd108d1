use bikeshare_core::{DashboardUseCase, DashboardView, DateRange};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Start,
    End,
}

pub struct App<'a> {
    usecase: &'a DashboardUseCase<'a>,
    pub bounds: Option<DateRange>,
    pub range: Option<DateRange>,
    pub focus: Focus,
    pub view: DashboardView,
}

impl<'a> App<'a> {
    pub fn new(usecase: &'a DashboardUseCase<'a>, initial: Option<DateRange>) -> Self {
        let range = match (initial, usecase.bounds()) {
            (Some(r), Some(bounds)) => Some(r.clamp_to(&bounds)),
            _ => usecase.default_range(),
        };
        let view = usecase.compute(range);
        App {
            usecase,
            bounds: usecase.bounds(),
            range,
            focus: Focus::Start,
            view,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Start => Focus::End,
            Focus::End => Focus::Start,
        };
    }

    /// Moves the focused end of the range by `days`. The range never leaves the
    /// observed bounds.
    pub fn shift(&mut self, days: i64) {
        let (Some(range), Some(bounds)) = (self.range, self.bounds) else {
            return;
        };
        let next = match self.focus {
            Focus::Start => range.shift_start(days, &bounds),
            Focus::End => range.shift_end(days, &bounds),
        };
        if next != range {
            self.range = Some(next);
            self.refresh();
        }
    }

    pub fn reset(&mut self) {
        self.range = self.usecase.default_range();
        self.refresh();
    }

    fn refresh(&mut self) {
        self.view = self.usecase.compute(self.range);
    }
}
