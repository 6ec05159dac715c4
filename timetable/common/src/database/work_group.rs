use chrono::Utc;

use super::{Ancestor, DatabaseTable, TablePatch, Ulid};

#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct WorkGroup {
	/// A unique id for the work group (primary key)
	pub id: Ulid,

	/// The user owning this work group
	pub owner_user_id: String,

	/// The display name of the work group
	pub name: String,

	/// The date and time the work group was created
	pub created_at: chrono::DateTime<Utc>,

	/// The date and time the work group was soft deleted, hiding it from
	/// every normal read
	pub deleted_at: Option<chrono::DateTime<Utc>>,
}

impl DatabaseTable for WorkGroup {
	const ANCESTORS: &'static [Ancestor] = &[];
	const DATA_COLUMNS: &'static [&'static str] = &["name"];
	const FRIENDLY_NAME: &'static str = "work group";
	const NAME: &'static str = "work_groups";
	const OWNER_COLUMN: Option<&'static str> = None;
	const PARENT_COLUMN: &'static str = "owner_user_id";

	type Insert = WorkGroupInsert;
	type ParentId = String;
	type Patch = WorkGroupPatch;

	fn bind_insert<'args>(
		insert: &'args Self::Insert,
		sep: &mut sqlx::query_builder::Separated<'_, 'args, sqlx::Postgres, &'static str>,
	) {
		sep.push_bind(&insert.name);
	}
}

#[derive(Debug, Clone, Default)]
pub struct WorkGroupInsert {
	/// The display name of the work group
	pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct WorkGroupPatch {
	/// A new display name
	pub name: Option<String>,
}

impl TablePatch for WorkGroupPatch {
	fn is_empty(&self) -> bool {
		self.name.is_none()
	}

	fn push_set_clauses<'args>(
		&'args self,
		seperated: &mut sqlx::query_builder::Separated<'_, 'args, sqlx::Postgres, &'static str>,
	) {
		if let Some(name) = &self.name {
			seperated.push("name = ").push_bind_unseparated(name);
		}
	}
}
