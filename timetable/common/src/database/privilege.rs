use chrono::Utc;
use sqlx::postgres::PgHasArrayType;

use super::Ulid;

/// The privilege a user holds on a work group. The derived ordering is the
/// authorization order, `None < Read < Write < Admin`, so the effective
/// privilege over several grants is their maximum.
#[derive(
	Debug, sqlx::Type, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, PartialOrd, Ord, Default,
)]
#[sqlx(type_name = "privilege_type")]
#[serde(rename_all = "snake_case")]
pub enum PrivilegeType {
	#[default]
	#[sqlx(rename = "NONE")]
	None,
	#[sqlx(rename = "READ")]
	Read,
	#[sqlx(rename = "WRITE")]
	Write,
	#[sqlx(rename = "ADMIN")]
	Admin,
}

impl PrivilegeType {
	/// True when this level allows reading.
	pub fn can_read(self) -> bool {
		self >= Self::Read
	}

	/// True when this level allows writing.
	pub fn can_write(self) -> bool {
		self >= Self::Write
	}

	/// True when this level allows administration, such as issuing and
	/// disabling invite keys.
	pub fn can_admin(self) -> bool {
		self >= Self::Admin
	}
}

impl PgHasArrayType for PrivilegeType {
	fn array_type_info() -> sqlx::postgres::PgTypeInfo {
		sqlx::postgres::PgTypeInfo::with_name("_privilege_type")
	}
}

impl std::fmt::Display for PrivilegeType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::None => write!(f, "none"),
			Self::Read => write!(f, "read"),
			Self::Write => write!(f, "write"),
			Self::Admin => write!(f, "admin"),
		}
	}
}

impl std::str::FromStr for PrivilegeType {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"none" => Ok(Self::None),
			"read" => Ok(Self::Read),
			"write" => Ok(Self::Write),
			"admin" => Ok(Self::Admin),
			_ => Err(()),
		}
	}
}

/// A privilege grant. Grants are keyed by work group and user rather than a
/// row id of their own, so they do not go through the generic store; the
/// privilege resolver and the invite key ledger query them directly.
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct WorkGroupPrivilege {
	/// The work group the privilege applies to (primary key)
	pub work_groups_id: Ulid,

	/// The user the privilege is granted to (primary key). May be the
	/// anonymous sentinel, in which case this is a public default grant
	pub uid: String,

	/// The granted privilege level
	pub privilege_type: PrivilegeType,

	/// The invite key this privilege was redeemed from, if any
	pub invite_keys_id: Option<Ulid>,

	/// The date and time the privilege was granted
	pub created_at: chrono::DateTime<Utc>,
}

impl WorkGroupPrivilege {
	/// The name of the grant table.
	pub const NAME: &'static str = "work_groups_privileges";

	/// The friendly name of the grant table, for error messages.
	pub const FRIENDLY_NAME: &'static str = "work group privilege";
}
