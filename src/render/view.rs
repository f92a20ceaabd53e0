use crate::api::types::Course;
use crate::query::types::QueryState;

use std::fmt;

/// Rows shown while a search is loading.
pub const PLACEHOLDER_ROWS: usize = 3;

pub const NO_RESULTS_MESSAGE: &str = "No results found. Try a different search term.";

/// One rendered course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRow {
    pub id: String,
    /// `"SUBJECT: Title"`.
    pub heading: String,
    pub description: String,
    pub relevance_percent: i64,
}

impl From<&Course> for CourseRow {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.clone(),
            heading: format!("{}: {}", course.subject, course.title),
            description: course.description.clone(),
            relevance_percent: relevance_percent(course.relevance_score),
        }
    }
}

/// The mutually exclusive things the results area can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    Nothing,
    Loading { placeholders: usize },
    Failure { message: String },
    Results(Vec<CourseRow>),
    Empty,
}

/// Projects a search state onto the view.
pub fn project(state: &QueryState<Vec<Course>>, committed_query_is_empty: bool) -> ResultsView {
    match state {
        QueryState::Idle => ResultsView::Nothing,
        QueryState::Loading => ResultsView::Loading {
            placeholders: PLACEHOLDER_ROWS,
        },
        QueryState::Failure(message) => ResultsView::Failure {
            message: message.clone(),
        },
        QueryState::Success(courses) if !courses.is_empty() => {
            ResultsView::Results(courses.iter().map(CourseRow::from).collect())
        }
        QueryState::Success(_) if committed_query_is_empty => ResultsView::Nothing,
        QueryState::Success(_) => ResultsView::Empty,
    }
}

/// `relevance_score * 100`, rounded to the nearest integer.
pub fn relevance_percent(score: f64) -> i64 {
    (score * 100.0).round() as i64
}

impl fmt::Display for CourseRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        writeln!(f, "  {}", self.description)?;
        write!(f, "  Relevance: {}%", self.relevance_percent)
    }
}

impl fmt::Display for ResultsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultsView::Nothing => Ok(()),
            ResultsView::Loading { placeholders } => {
                for i in 0..*placeholders {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "[ ............ ]")?;
                }
                Ok(())
            }
            ResultsView::Failure { message } => write!(f, "Error: {}", message),
            ResultsView::Results(rows) => {
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", row)?;
                }
                Ok(())
            }
            ResultsView::Empty => write!(f, "{}", NO_RESULTS_MESSAGE),
        }
    }
}
