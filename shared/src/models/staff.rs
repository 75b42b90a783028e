//! Staff Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, AppResult, ErrorCode};
use crate::types::Timestamp;
use crate::util::non_blank;

/// Attendance for the current shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum AttendanceStatus {
    #[default]
    Present,
    Leave,
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Leave => "leave",
            AttendanceStatus::Absent => "absent",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AttendanceStatus::Present),
            "leave" => Ok(AttendanceStatus::Leave),
            "absent" => Ok(AttendanceStatus::Absent),
            other => Err(AppError::with_message(
                ErrorCode::InvalidFormat,
                format!("unknown attendance status: {other}"),
            )),
        }
    }
}

/// Staff member entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StaffMember {
    pub id: i64,
    pub name: String,
    /// Job title ("Head Chef", "Waiter")
    pub role: String,
    /// Shift label ("Morning", "Evening")
    pub shift: String,
    pub contact: Option<String>,
    pub status: AttendanceStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Create staff member payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMemberCreate {
    pub name: String,
    pub role: String,
    pub shift: String,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub status: AttendanceStatus,
}

impl StaffMemberCreate {
    pub fn normalized(self) -> AppResult<Self> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(
                AppError::with_message(ErrorCode::RequiredField, "staff name must not be empty")
                    .with_detail("field", "name"),
            );
        }
        Ok(Self {
            name,
            role: self.role.trim().to_string(),
            shift: self.shift.trim().to_string(),
            contact: non_blank(self.contact),
            status: self.status,
        })
    }
}

/// Update staff member payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaffMemberUpdate {
    pub name: Option<String>,
    pub role: Option<String>,
    pub shift: Option<String>,
    pub contact: Option<String>,
    pub status: Option<AttendanceStatus>,
}

impl StaffMemberUpdate {
    pub fn normalized(self) -> AppResult<Self> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err(
                AppError::with_message(ErrorCode::RequiredField, "staff name must not be empty")
                    .with_detail("field", "name"),
            );
        }
        Ok(Self {
            name: self.name.map(|n| n.trim().to_string()),
            role: self.role.map(|r| r.trim().to_string()),
            shift: self.shift.map(|s| s.trim().to_string()),
            contact: self.contact.map(|c| c.trim().to_string()),
            status: self.status,
        })
    }
}

/// Attendance counts for the staff dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub total: usize,
    pub present: usize,
    pub leave: usize,
    pub absent: usize,
}

impl AttendanceSummary {
    pub fn from_members<'a, I>(members: I) -> Self
    where
        I: IntoIterator<Item = &'a StaffMember>,
    {
        members
            .into_iter()
            .fold(Self::default(), |mut acc, member| {
                acc.total += 1;
                match member.status {
                    AttendanceStatus::Present => acc.present += 1,
                    AttendanceStatus::Leave => acc.leave += 1,
                    AttendanceStatus::Absent => acc.absent += 1,
                }
                acc
            })
    }
}
