pub mod handlers;
pub mod models;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::get, Router};
use libris_kernel::{InitCtx, Module, SchemaFragment};
use serde_json::json;

use crate::catalog::{CatalogHandle, SqlCatalog};

/// Books resource: CRUD plus the joined book-with-author view
pub struct BooksModule;

impl BooksModule {
    pub const fn new() -> Self {
        Self
    }
}

/// Routes relative to the module mount point.
pub fn router(catalog: CatalogHandle) -> Router {
    Router::new()
        .route("/", get(handlers::list_books).post(handlers::create_book))
        .route(
            "/{id}",
            get(handlers::get_book)
                .put(handlers::update_book)
                .delete(handlers::delete_book),
        )
        .with_state(catalog)
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self, ctx: &InitCtx<'_>) -> Router {
        router(Arc::new(SqlCatalog::new(ctx.db.clone())))
    }

    // Applied after `authors` (fragments are ordered by module name).
    fn schema(&self) -> Vec<SchemaFragment> {
        vec![SchemaFragment {
            id: "001_books",
            sql: r"
                CREATE TABLE IF NOT EXISTS books (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    title TEXT NOT NULL,
                    published INTEGER NOT NULL,
                    author_id INTEGER NOT NULL REFERENCES authors (id)
                        ON UPDATE CASCADE ON DELETE CASCADE
                );
                CREATE INDEX IF NOT EXISTS books_author_id_idx ON books (author_id);
                ",
        }]
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };
        let book = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Book" }
                    }
                }
            })
        };

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "All books",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            },
                            "500": error("Storage failure")
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CreateBook" }
                                }
                            }
                        },
                        "responses": {
                            "201": book("Created book"),
                            "400": error("Missing or invalid fields"),
                            "404": error("Referenced author not found")
                        }
                    }
                },
                "/{id}": {
                    "parameters": [{
                        "name": "id",
                        "in": "path",
                        "required": true,
                        "schema": { "type": "integer", "minimum": 1 }
                    }],
                    "get": {
                        "summary": "Get a book with its author",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "Book joined with author fields",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/BookWithAuthor" }
                                    }
                                }
                            },
                            "400": error("Invalid id"),
                            "404": error("Book not found")
                        }
                    },
                    "put": {
                        "summary": "Partially update a book",
                        "description": "A supplied author_id must reference an existing author. When every supplied value matches the stored row the response is a message and nothing is written.",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/UpdateBook" }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Updated book, or a no-op message",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "oneOf": [
                                                { "$ref": "#/components/schemas/Book" },
                                                { "$ref": "#/components/schemas/Message" }
                                            ]
                                        }
                                    }
                                }
                            },
                            "400": error("Invalid id, fields, or author reference"),
                            "404": error("Book not found")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "responses": {
                            "200": book("Deleted book snapshot"),
                            "400": error("Invalid id"),
                            "404": error("Book not found")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "title": { "type": "string" },
                            "author_id": { "type": "integer" },
                            "published": { "type": "integer" }
                        },
                        "required": ["id", "title", "author_id", "published"]
                    },
                    "BookWithAuthor": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "title": { "type": "string" },
                            "author_id": { "type": "integer" },
                            "published": { "type": "integer" },
                            "author": { "type": "string" },
                            "birthYear": { "type": "integer" },
                            "nationality": { "type": "string" }
                        },
                        "required": ["id", "title", "author_id", "published", "author", "birthYear", "nationality"]
                    },
                    "CreateBook": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string", "minLength": 2, "maxLength": 200 },
                            "author_id": { "type": "integer", "minimum": 1 },
                            "published": { "type": "integer", "minimum": 0 }
                        },
                        "required": ["title", "author_id", "published"]
                    },
                    "UpdateBook": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string", "minLength": 2, "maxLength": 200 },
                            "author_id": { "type": "integer", "minimum": 1 },
                            "published": { "type": "integer", "minimum": 0 }
                        },
                        "minProperties": 1
                    }
                }
            }
        }))
    }
}

/// Create a new instance of the books module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(BooksModule::new())
}
