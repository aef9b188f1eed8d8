#[derive(Debug)]
pub struct Capability {
    /// When true, the database uses a SQL-based query language.
    pub sql: bool,

    /// Supports `INSERT ... RETURNING`, used to read back generated
    /// identifiers.
    pub returning: bool,

    /// Positional parameters are numbered (`$1`) instead of `?1`.
    pub numbered_params: bool,
}

impl Capability {
    /// SQLite capabilities.
    pub const SQLITE: Self = Self {
        sql: true,
        returning: true,
        numbered_params: false,
    };

    /// PostgreSQL capabilities
    pub const POSTGRESQL: Self = Self {
        numbered_params: true,
        ..Self::SQLITE
    };
}
