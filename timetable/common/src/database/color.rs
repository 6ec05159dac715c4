use chrono::Utc;

use super::{Ancestor, DatabaseTable, TablePatch, Ulid};

/// A named color of a work group's palette, referenced by works for display.
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct Color {
	/// A unique id for the color (primary key)
	pub id: Ulid,

	/// The work group this color belongs to
	pub work_groups_id: Ulid,

	/// The user who created this color
	pub owner_user_id: String,

	/// The display name of the color
	pub name: String,

	/// The hex value of the color, for example "#ff8800"
	pub value: String,

	/// The date and time the color was created
	pub created_at: chrono::DateTime<Utc>,

	/// The date and time the color was soft deleted
	pub deleted_at: Option<chrono::DateTime<Utc>>,
}

impl DatabaseTable for Color {
	const ANCESTORS: &'static [Ancestor] = &[Ancestor {
		table: "work_groups",
		column: "work_groups_id",
	}];
	const DATA_COLUMNS: &'static [&'static str] = &["name", "value"];
	const FRIENDLY_NAME: &'static str = "color";
	const NAME: &'static str = "colors";
	const OWNER_COLUMN: Option<&'static str> = Some("owner_user_id");
	const PARENT_COLUMN: &'static str = "work_groups_id";

	type Insert = ColorInsert;
	type ParentId = Ulid;
	type Patch = ColorPatch;

	fn bind_insert<'args>(
		insert: &'args Self::Insert,
		sep: &mut sqlx::query_builder::Separated<'_, 'args, sqlx::Postgres, &'static str>,
	) {
		sep.push_bind(&insert.name);
		sep.push_bind(&insert.value);
	}
}

#[derive(Debug, Clone, Default)]
pub struct ColorInsert {
	/// The display name of the color
	pub name: String,
	/// The hex value of the color
	pub value: String,
}

#[derive(Debug, Clone, Default)]
pub struct ColorPatch {
	/// A new display name
	pub name: Option<String>,
	/// A new hex value
	pub value: Option<String>,
}

impl TablePatch for ColorPatch {
	fn is_empty(&self) -> bool {
		self.name.is_none() && self.value.is_none()
	}

	fn push_set_clauses<'args>(
		&'args self,
		seperated: &mut sqlx::query_builder::Separated<'_, 'args, sqlx::Postgres, &'static str>,
	) {
		if let Some(name) = &self.name {
			seperated.push("name = ").push_bind_unseparated(name);
		}

		if let Some(value) = &self.value {
			seperated.push("value = ").push_bind_unseparated(value);
		}
	}
}
