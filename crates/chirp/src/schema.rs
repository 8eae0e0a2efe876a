//! Structural definition of the five social-graph tables.
//!
//! The SQL in `migrations/` is the durable contract applied to the store; the
//! definitions here describe the same tables in a form the rest of the
//! workspace can reason about (the seeding plan uses [`Entity::references`]
//! to check that rows are written after the rows they point at).

use serde::Serialize;

/// The entities persisted by the backend, in dependency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    User,
    Tweet,
    Follow,
    Like,
    EditHistory,
}

impl Entity {
    /// All entities, ordered so that every entity comes after the ones it references.
    pub const ALL: [Entity; 5] = [
        Entity::User,
        Entity::Tweet,
        Entity::Follow,
        Entity::Like,
        Entity::EditHistory,
    ];

    pub fn table_name(self) -> &'static str {
        self.definition().name
    }

    pub fn definition(self) -> &'static TableDef {
        match self {
            Entity::User => &USERS,
            Entity::Tweet => &TWEETS,
            Entity::Follow => &FOLLOWS,
            Entity::Like => &LIKES,
            Entity::EditHistory => &EDIT_HISTORY,
        }
    }

    /// Entities this entity holds foreign keys to, without duplicates.
    pub fn references(self) -> Vec<Entity> {
        let mut refs: Vec<Entity> = self
            .definition()
            .columns
            .iter()
            .filter_map(|c| c.references)
            .collect();
        refs.sort();
        refs.dedup();
        refs
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Semantic column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Auto-incrementing surrogate identifier.
    Serial,
    BigInt,
    Varchar(u16),
    Text,
    Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Index {
    None,
    Plain,
    Unique,
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
    pub nullable: bool,
    pub index: Index,
    /// Foreign key target (always the referenced entity's `id`).
    pub references: Option<Entity>,
}

impl ColumnDef {
    const fn new(name: &'static str, ty: ColumnType) -> Self {
        Self {
            name,
            ty,
            nullable: false,
            index: Index::None,
            references: None,
        }
    }

    const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    const fn indexed(mut self) -> Self {
        self.index = Index::Plain;
        self
    }

    const fn unique(mut self) -> Self {
        self.index = Index::Unique;
        self
    }

    const fn references(mut self, entity: Entity) -> Self {
        self.references = Some(entity);
        self.index = Index::Plain;
        self
    }

    pub fn is_unique(&self) -> bool {
        self.index == Index::Unique
    }
}

#[derive(Debug)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
    /// Column sets that are unique together.
    pub unique_together: &'static [&'static [&'static str]],
}

impl TableDef {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }
}

const ID: ColumnDef = ColumnDef::new("id", ColumnType::Serial).unique();
const CREATED_AT: ColumnDef = ColumnDef::new("created_at", ColumnType::Timestamp);

pub static USERS: TableDef = TableDef {
    name: "users",
    columns: &[
        ID,
        ColumnDef::new("username", ColumnType::Varchar(30)).unique(),
        ColumnDef::new("email", ColumnType::Varchar(255)).unique(),
        ColumnDef::new("password", ColumnType::Varchar(255)),
        ColumnDef::new("bio", ColumnType::Text).nullable(),
        ColumnDef::new("profile_pic", ColumnType::Varchar(255)).nullable(),
        CREATED_AT,
    ],
    unique_together: &[],
};

pub static TWEETS: TableDef = TableDef {
    name: "tweets",
    columns: &[
        ID,
        ColumnDef::new("title", ColumnType::Varchar(255)).nullable(),
        ColumnDef::new("body", ColumnType::Text).nullable(),
        ColumnDef::new("user_id", ColumnType::BigInt).references(Entity::User),
        ColumnDef::new("status", ColumnType::Varchar(50)).nullable(),
        CREATED_AT,
    ],
    unique_together: &[],
};

pub static FOLLOWS: TableDef = TableDef {
    name: "follows",
    columns: &[
        ID,
        ColumnDef::new("following_user_id", ColumnType::BigInt).references(Entity::User),
        ColumnDef::new("followed_user_id", ColumnType::BigInt).references(Entity::User),
        CREATED_AT,
    ],
    unique_together: &[&["following_user_id", "followed_user_id"]],
};

pub static LIKES: TableDef = TableDef {
    name: "likes",
    columns: &[
        ID,
        ColumnDef::new("user_id", ColumnType::BigInt).references(Entity::User),
        ColumnDef::new("tweet_id", ColumnType::BigInt).references(Entity::Tweet),
        CREATED_AT,
    ],
    unique_together: &[&["user_id", "tweet_id"]],
};

pub static EDIT_HISTORY: TableDef = TableDef {
    name: "edit_history",
    columns: &[
        ID,
        ColumnDef::new("tweet_id", ColumnType::BigInt).references(Entity::Tweet),
        ColumnDef::new("previous_body", ColumnType::Text).nullable(),
        ColumnDef::new("edited_at", ColumnType::Timestamp).indexed(),
    ],
    unique_together: &[],
};
