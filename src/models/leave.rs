//! Leave types and the label table used to classify free-text leave annotations.

use serde::{Deserialize, Serialize};

/// Classification of a planned or recorded absence on a day.
///
/// # Example
///
/// ```
/// use worktime_engine::models::LeaveType;
///
/// let json = serde_json::to_string(&LeaveType::FullDay).unwrap();
/// assert_eq!(json, "\"full_day\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// No leave taken.
    #[default]
    None,
    /// Morning off; the employee is expected in the afternoon.
    Morning,
    /// Afternoon off.
    Afternoon,
    /// The whole day off.
    FullDay,
    /// An explicit start/end time range.
    Custom,
}

impl LeaveType {
    /// The canonical label written back to attendance sources.
    pub fn label(&self) -> &'static str {
        match self {
            LeaveType::None => "正常",
            LeaveType::Morning => "上午请假",
            LeaveType::Afternoon => "下午请假",
            LeaveType::FullDay => "全天请假",
            LeaveType::Custom => "自定义时间段",
        }
    }
}

impl std::fmt::Display for LeaveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry of the classification table: any annotation containing
/// `pattern` (case-insensitively) maps to `leave_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveLabel {
    /// Substring to look for.
    pub pattern: String,
    /// The type assigned when the pattern matches.
    pub leave_type: LeaveType,
}

impl LeaveLabel {
    /// Creates a table entry.
    pub fn new(pattern: impl Into<String>, leave_type: LeaveType) -> Self {
        Self {
            pattern: pattern.into(),
            leave_type,
        }
    }
}

/// Maps free-text leave annotations onto [`LeaveType`].
///
/// Entries are tried in order and the first match wins, so more specific
/// patterns belong earlier in the table. An annotation that matches nothing
/// becomes [`LeaveType::Custom`] when an explicit time range accompanies it,
/// and [`LeaveType::None`] otherwise.
///
/// # Example
///
/// ```
/// use worktime_engine::models::{LeaveClassifier, LeaveType};
///
/// let classifier = LeaveClassifier::default();
/// assert_eq!(classifier.classify("上午请假", false), LeaveType::Morning);
/// assert_eq!(classifier.classify("Afternoon", false), LeaveType::Afternoon);
/// assert_eq!(classifier.classify("", true), LeaveType::Custom);
/// assert_eq!(classifier.classify("正常", false), LeaveType::None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveClassifier {
    labels: Vec<LeaveLabel>,
}

impl LeaveClassifier {
    /// Builds a classifier from an ordered table.
    pub fn new(labels: Vec<LeaveLabel>) -> Self {
        let labels = labels
            .into_iter()
            .filter(|l| !l.pattern.trim().is_empty())
            .map(|l| LeaveLabel {
                pattern: l.pattern.trim().to_lowercase(),
                leave_type: l.leave_type,
            })
            .collect();
        Self { labels }
    }

    /// The built-in Chinese/English table.
    pub fn default_labels() -> Vec<LeaveLabel> {
        vec![
            LeaveLabel::new("正常", LeaveType::None),
            LeaveLabel::new("none", LeaveType::None),
            LeaveLabel::new("自定义", LeaveType::Custom),
            LeaveLabel::new("custom", LeaveType::Custom),
            LeaveLabel::new("全天", LeaveType::FullDay),
            LeaveLabel::new("full_day", LeaveType::FullDay),
            LeaveLabel::new("full day", LeaveType::FullDay),
            LeaveLabel::new("上午", LeaveType::Morning),
            LeaveLabel::new("morning", LeaveType::Morning),
            LeaveLabel::new("下午", LeaveType::Afternoon),
            LeaveLabel::new("afternoon", LeaveType::Afternoon),
        ]
    }

    /// The table in match order.
    pub fn labels(&self) -> &[LeaveLabel] {
        &self.labels
    }

    /// Classifies an annotation.
    ///
    /// `has_time_range` reports whether both an explicit leave start and end
    /// were supplied alongside the annotation.
    pub fn classify(&self, annotation: &str, has_time_range: bool) -> LeaveType {
        let needle = annotation.trim().to_lowercase();
        if !needle.is_empty() {
            if let Some(label) = self.labels.iter().find(|l| needle.contains(&l.pattern)) {
                return label.leave_type;
            }
        }
        if has_time_range {
            LeaveType::Custom
        } else {
            LeaveType::None
        }
    }
}

impl Default for LeaveClassifier {
    fn default() -> Self {
        Self::new(Self::default_labels())
    }
}
