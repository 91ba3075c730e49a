#[derive(Debug, Clone)]
pub struct Participant {
    pub id: Option<i64>,
    pub period_id: String,
    pub nombre: String,
}

#[derive(Debug, Clone)]
pub struct MeetingDate {
    pub id: Option<i64>,
    pub period_id: String,
    pub fecha: String,
}

/// Attendance status for a participant on a meeting date. `None` is the
/// "no data" sentinel: it is never stored, it deletes the mark instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkStatus {
    Asistio,
    Justificado,
    Falta,
    Atraso,
    None,
}

impl MarkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asistio => "A",
            Self::Justificado => "J",
            Self::Falta => "F",
            Self::Atraso => "AT",
            Self::None => "none",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "A" => Self::Asistio,
            "J" => Self::Justificado,
            "F" => Self::Falta,
            "AT" => Self::Atraso,
            _ => Self::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl std::fmt::Display for MarkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One stored mark, keyed by (participant_id, date_id).
#[derive(Debug, Clone)]
pub struct Mark {
    pub id: Option<i64>,
    pub period_id: String,
    pub participant_id: i64,
    pub date_id: i64,
    pub status: MarkStatus,
}
