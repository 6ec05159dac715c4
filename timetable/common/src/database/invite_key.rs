use chrono::{DateTime, Utc};

use super::{Ancestor, DatabaseTable, PrivilegeType, TablePatch, Ulid};

/// The lifecycle of an invite key at one instant. `Pending` and `Active`
/// resolve from the validity window, so a key moves through them without any
/// write; `Disabled` is terminal and only reachable before expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InviteKeyState {
	/// The validity window has not opened yet
	Pending,
	/// The key can be redeemed
	Active,
	/// The validity window has closed
	Expired,
	/// The key was disabled by an administrator
	Disabled,
}

/// A redeemable, time boxed token granting a fixed privilege level on a work
/// group.
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct InviteKey {
	/// A unique id for the invite key (primary key)
	pub id: Ulid,

	/// The work group this key grants privileges on
	pub work_groups_id: Ulid,

	/// The administrator who issued this key
	pub owner_user_id: String,

	/// A free form description shown to administrators
	pub description: String,

	/// The start of the validity window, immediately valid when unset
	pub valid_from: Option<DateTime<Utc>>,

	/// The end of the validity window, never expiring when unset
	pub expires_at: Option<DateTime<Utc>>,

	/// How many users may redeem this key, unlimited when unset
	pub use_limit: Option<i32>,

	/// The date and time the key was disabled, terminal once set
	pub disabled_at: Option<DateTime<Utc>>,

	/// The privilege level granted on redemption
	pub privilege_type: PrivilegeType,

	/// The date and time the key was created
	pub created_at: DateTime<Utc>,

	/// The date and time the key was soft deleted
	pub deleted_at: Option<DateTime<Utc>>,
}

impl DatabaseTable for InviteKey {
	const ANCESTORS: &'static [Ancestor] = &[Ancestor {
		table: "work_groups",
		column: "work_groups_id",
	}];
	const DATA_COLUMNS: &'static [&'static str] =
		&["description", "valid_from", "expires_at", "use_limit", "privilege_type"];
	const FRIENDLY_NAME: &'static str = "invite key";
	const NAME: &'static str = "invite_keys";
	const OWNER_COLUMN: Option<&'static str> = Some("owner_user_id");
	const PARENT_COLUMN: &'static str = "work_groups_id";

	type Insert = InviteKeyInsert;
	type ParentId = Ulid;
	type Patch = InviteKeyPatch;

	fn bind_insert<'args>(
		insert: &'args Self::Insert,
		sep: &mut sqlx::query_builder::Separated<'_, 'args, sqlx::Postgres, &'static str>,
	) {
		sep.push_bind(&insert.description);
		sep.push_bind(insert.valid_from);
		sep.push_bind(insert.expires_at);
		sep.push_bind(insert.use_limit);
		sep.push_bind(insert.privilege_type);
	}
}

impl InviteKey {
	/// The lifecycle state at `now`.
	pub fn state(&self, now: DateTime<Utc>) -> InviteKeyState {
		if self.disabled_at.is_some() {
			return InviteKeyState::Disabled;
		}

		if self.valid_from.is_some_and(|from| now < from) {
			return InviteKeyState::Pending;
		}

		if self.expires_at.is_some_and(|until| now > until) {
			return InviteKeyState::Expired;
		}

		InviteKeyState::Active
	}

	/// True when redeeming the key at `now` can succeed.
	pub fn is_redeemable(&self, now: DateTime<Utc>) -> bool {
		self.state(now) == InviteKeyState::Active
	}
}

#[derive(Debug, Clone, Default)]
pub struct InviteKeyInsert {
	/// A free form description shown to administrators
	pub description: String,
	/// The start of the validity window
	pub valid_from: Option<DateTime<Utc>>,
	/// The end of the validity window
	pub expires_at: Option<DateTime<Utc>>,
	/// How many users may redeem this key
	pub use_limit: Option<i32>,
	/// The privilege level granted on redemption
	pub privilege_type: PrivilegeType,
}

#[derive(Debug, Clone, Default)]
pub struct InviteKeyPatch {
	/// A new description
	pub description: Option<String>,
}

impl TablePatch for InviteKeyPatch {
	fn is_empty(&self) -> bool {
		self.description.is_none()
	}

	fn push_set_clauses<'args>(
		&'args self,
		seperated: &mut sqlx::query_builder::Separated<'_, 'args, sqlx::Postgres, &'static str>,
	) {
		if let Some(description) = &self.description {
			seperated.push("description = ").push_bind_unseparated(description);
		}
	}
}
