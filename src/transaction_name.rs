// SPDX-License-Identifier: Apache-2.0

use std::fmt::{
    self,
    Display,
    Formatter,
};
use std::str::FromStr;

use crate::Error;

/// The closed set of transactions the platform supports.
///
/// The string form is the stable wire identifier used by the registry, the
/// CLI, and the database API; it is globally unique across protocol
/// versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum TransactionName {
    /// Mint the non-transferable token identifying a user.
    AccessTokenMint,
    /// Enroll a student into a course.
    CourseStudentEnroll,
    /// Commit assignment evidence for a course module.
    CourseStudentAssignmentCommit,
    /// Replace previously committed assignment evidence.
    CourseStudentAssignmentUpdate,
    /// Burn the course state token and claim the course credential.
    CourseStudentCredentialClaim,
    /// Accept a student's committed assignment.
    CourseTeacherAssignmentAccept,
    /// Deny a student's committed assignment.
    CourseTeacherAssignmentDeny,
    /// Mint module tokens named by their SLT hashes.
    CourseOwnerModulesMint,
    /// Burn module tokens that were retired from the course.
    CourseOwnerModulesBurn,
    /// Enroll a contributor into a project.
    ProjectContributorEnroll,
    /// Commit to an open project task.
    ProjectContributorTaskCommit,
    /// Submit evidence for a committed project task.
    ProjectContributorTaskSubmit,
    /// Burn the contributor state token and claim the project credential.
    ProjectContributorCredentialClaim,
    /// Accept a contributor's submitted task.
    ProjectManagerTaskAccept,
    /// Deny a contributor's submitted task.
    ProjectManagerTaskDeny,
    /// Publish tasks as on-chain records named by their task hashes.
    ProjectManagerTasksMint,
    /// Fund the project treasury.
    ProjectOwnerTreasuryFund,
    /// Enroll a student into a course (v2 contracts).
    CourseStudentEnrollV2,
    /// Commit assignment evidence for a course module (v2 contracts).
    CourseStudentAssignmentCommitV2,
    /// Mint module tokens named by their SLT hashes (v2 contracts).
    CourseOwnerModulesMintV2,
    /// Commit to an open project task (v2 contracts).
    ProjectContributorTaskCommitV2,
}

impl TransactionName {
    /// The stable wire identifier for this transaction.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AccessTokenMint => "ACCESS_TOKEN_MINT",
            Self::CourseStudentEnroll => "COURSE_STUDENT_ENROLL",
            Self::CourseStudentAssignmentCommit => "COURSE_STUDENT_ASSIGNMENT_COMMIT",
            Self::CourseStudentAssignmentUpdate => "COURSE_STUDENT_ASSIGNMENT_UPDATE",
            Self::CourseStudentCredentialClaim => "COURSE_STUDENT_CREDENTIAL_CLAIM",
            Self::CourseTeacherAssignmentAccept => "COURSE_TEACHER_ASSIGNMENT_ACCEPT",
            Self::CourseTeacherAssignmentDeny => "COURSE_TEACHER_ASSIGNMENT_DENY",
            Self::CourseOwnerModulesMint => "COURSE_OWNER_MODULES_MINT",
            Self::CourseOwnerModulesBurn => "COURSE_OWNER_MODULES_BURN",
            Self::ProjectContributorEnroll => "PROJECT_CONTRIBUTOR_ENROLL",
            Self::ProjectContributorTaskCommit => "PROJECT_CONTRIBUTOR_TASK_COMMIT",
            Self::ProjectContributorTaskSubmit => "PROJECT_CONTRIBUTOR_TASK_SUBMIT",
            Self::ProjectContributorCredentialClaim => "PROJECT_CONTRIBUTOR_CREDENTIAL_CLAIM",
            Self::ProjectManagerTaskAccept => "PROJECT_MANAGER_TASK_ACCEPT",
            Self::ProjectManagerTaskDeny => "PROJECT_MANAGER_TASK_DENY",
            Self::ProjectManagerTasksMint => "PROJECT_MANAGER_TASKS_MINT",
            Self::ProjectOwnerTreasuryFund => "PROJECT_OWNER_TREASURY_FUND",
            Self::CourseStudentEnrollV2 => "COURSE_STUDENT_ENROLL_V2",
            Self::CourseStudentAssignmentCommitV2 => "COURSE_STUDENT_ASSIGNMENT_COMMIT_V2",
            Self::CourseOwnerModulesMintV2 => "COURSE_OWNER_MODULES_MINT_V2",
            Self::ProjectContributorTaskCommitV2 => "PROJECT_CONTRIBUTOR_TASK_COMMIT_V2",
        }
    }
}

impl Display for TransactionName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACCESS_TOKEN_MINT" => Ok(Self::AccessTokenMint),
            "COURSE_STUDENT_ENROLL" => Ok(Self::CourseStudentEnroll),
            "COURSE_STUDENT_ASSIGNMENT_COMMIT" => Ok(Self::CourseStudentAssignmentCommit),
            "COURSE_STUDENT_ASSIGNMENT_UPDATE" => Ok(Self::CourseStudentAssignmentUpdate),
            "COURSE_STUDENT_CREDENTIAL_CLAIM" => Ok(Self::CourseStudentCredentialClaim),
            "COURSE_TEACHER_ASSIGNMENT_ACCEPT" => Ok(Self::CourseTeacherAssignmentAccept),
            "COURSE_TEACHER_ASSIGNMENT_DENY" => Ok(Self::CourseTeacherAssignmentDeny),
            "COURSE_OWNER_MODULES_MINT" => Ok(Self::CourseOwnerModulesMint),
            "COURSE_OWNER_MODULES_BURN" => Ok(Self::CourseOwnerModulesBurn),
            "PROJECT_CONTRIBUTOR_ENROLL" => Ok(Self::ProjectContributorEnroll),
            "PROJECT_CONTRIBUTOR_TASK_COMMIT" => Ok(Self::ProjectContributorTaskCommit),
            "PROJECT_CONTRIBUTOR_TASK_SUBMIT" => Ok(Self::ProjectContributorTaskSubmit),
            "PROJECT_CONTRIBUTOR_CREDENTIAL_CLAIM" => Ok(Self::ProjectContributorCredentialClaim),
            "PROJECT_MANAGER_TASK_ACCEPT" => Ok(Self::ProjectManagerTaskAccept),
            "PROJECT_MANAGER_TASK_DENY" => Ok(Self::ProjectManagerTaskDeny),
            "PROJECT_MANAGER_TASKS_MINT" => Ok(Self::ProjectManagerTasksMint),
            "PROJECT_OWNER_TREASURY_FUND" => Ok(Self::ProjectOwnerTreasuryFund),
            "COURSE_STUDENT_ENROLL_V2" => Ok(Self::CourseStudentEnrollV2),
            "COURSE_STUDENT_ASSIGNMENT_COMMIT_V2" => Ok(Self::CourseStudentAssignmentCommitV2),
            "COURSE_OWNER_MODULES_MINT_V2" => Ok(Self::CourseOwnerModulesMintV2),
            "PROJECT_CONTRIBUTOR_TASK_COMMIT_V2" => Ok(Self::ProjectContributorTaskCommitV2),
            _ => Err(Error::unknown_transaction(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::TransactionName;
    use crate::registry;
    use crate::Error;

    #[test]
    fn wire_names_round_trip() {
        for definition in registry::all_transaction_definitions() {
            let name = definition.tx_type;
            assert_eq!(name.as_str().parse::<TransactionName>().unwrap(), name);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_matches!(
            "COURSE_STUDENT_GRADUATE".parse::<TransactionName>(),
            Err(Error::UnknownTransaction(name)) => assert_eq!(name, "COURSE_STUDENT_GRADUATE")
        );
    }
}
