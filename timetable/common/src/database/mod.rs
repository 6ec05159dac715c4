mod color;
mod invite_key;
mod privilege;
mod station;
mod station_track;
mod timetable_row;
mod train;
mod ulid;
mod work;
mod work_group;

pub use color::*;
pub use invite_key::*;
pub use privilege::*;
pub use station::*;
pub use station_track::*;
pub use timetable_row::*;
pub use train::*;
pub use ulid::*;
pub use work::*;
pub use work_group::*;

/// One hop in a table's ancestor chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ancestor {
	/// The ancestor table name.
	pub table: &'static str,

	/// The column referencing `table`, found in the table one level below it.
	pub column: &'static str,
}

/// Describes a soft deleted, parent scoped table so that a single generic
/// store implementation can serve every entity type.
pub trait DatabaseTable: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin {
	/// The name of the table in the database.
	const NAME: &'static str;

	/// The friendly name of the table. This is used in error messages and
	/// should be able to be pluralized. For example, "work" or "timetable
	/// row" as we can say "work not found" or "timetable rows not found".
	const FRIENDLY_NAME: &'static str;

	/// The tables between this one and its owning work group, nearest first
	/// and ending with `work_groups` itself. Empty for `work_groups`, which
	/// is its own root.
	const ANCESTORS: &'static [Ancestor];

	/// The column scoping rows to their direct parent. `work_groups` has no
	/// parent table, so its rows are scoped by the owning user column.
	const PARENT_COLUMN: &'static str;

	/// The owning user column, unless `PARENT_COLUMN` already is it.
	const OWNER_COLUMN: Option<&'static str>;

	/// The columns written by bulk inserts, after id, parent and owner.
	const DATA_COLUMNS: &'static [&'static str];

	/// The value type of the parent scope. A `Ulid` everywhere except
	/// `work_groups`, which is scoped by user id. Array encoding is required
	/// so bulk reads can match a whole set of parents at once.
	type ParentId: for<'q> sqlx::Encode<'q, sqlx::Postgres>
		+ sqlx::Type<sqlx::Postgres>
		+ sqlx::postgres::PgHasArrayType
		+ Clone
		+ Send
		+ Sync
		+ 'static;

	/// The payload of a bulk insert, one per new row.
	type Insert: Send + Sync;

	/// The payload of a partial update.
	type Patch: TablePatch + Send + Sync;

	/// Binds one new row's `DATA_COLUMNS` values, in declaration order.
	fn bind_insert<'args>(
		insert: &'args Self::Insert,
		sep: &mut sqlx::query_builder::Separated<'_, 'args, sqlx::Postgres, &'static str>,
	);
}

/// A partial update payload, pushing a `column = value` clause for every
/// field that is present.
pub trait TablePatch {
	/// True when no field is set. Empty patches are a no-op at the call site
	/// and never reach the database.
	fn is_empty(&self) -> bool;

	/// Pushes the `SET` clauses for every present field.
	fn push_set_clauses<'args>(
		&'args self,
		seperated: &mut sqlx::query_builder::Separated<'_, 'args, sqlx::Postgres, &'static str>,
	);
}
