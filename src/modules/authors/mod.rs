pub mod handlers;
pub mod models;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::get, Router};
use libris_kernel::{InitCtx, Module, SchemaFragment};
use serde_json::json;

use crate::catalog::{CatalogHandle, SqlCatalog};

/// Authors resource: CRUD plus the author's book listing
pub struct AuthorsModule;

impl AuthorsModule {
    pub const fn new() -> Self {
        Self
    }
}

/// Routes relative to the module mount point.
pub fn router(catalog: CatalogHandle) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::list_authors).post(handlers::create_author),
        )
        .route(
            "/{id}",
            get(handlers::get_author)
                .put(handlers::update_author)
                .delete(handlers::delete_author),
        )
        .route("/{id}/books", get(handlers::list_author_books))
        .with_state(catalog)
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        "authors"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "authors module initialized"
        );
        Ok(())
    }

    fn routes(&self, ctx: &InitCtx<'_>) -> Router {
        router(Arc::new(SqlCatalog::new(ctx.db.clone())))
    }

    fn schema(&self) -> Vec<SchemaFragment> {
        vec![SchemaFragment {
            id: "001_authors",
            sql: r"
                CREATE TABLE IF NOT EXISTS authors (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    author TEXT NOT NULL,
                    birth_year INTEGER NOT NULL,
                    nationality TEXT NOT NULL
                );
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
        let author = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Author" }
                    }
                }
            })
        };
        let id_param = json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "minimum": 1 }
        }]);

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List authors",
                        "tags": ["Authors"],
                        "responses": {
                            "200": {
                                "description": "All authors",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Author" }
                                        }
                                    }
                                }
                            },
                            "500": error("Storage failure")
                        }
                    },
                    "post": {
                        "summary": "Create an author",
                        "tags": ["Authors"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CreateAuthor" }
                                }
                            }
                        },
                        "responses": {
                            "201": author("Created author"),
                            "400": error("Missing or invalid fields"),
                            "500": error("Storage failure")
                        }
                    }
                },
                "/{id}": {
                    "parameters": id_param,
                    "get": {
                        "summary": "Get an author",
                        "tags": ["Authors"],
                        "responses": {
                            "200": author("The author"),
                            "400": error("Invalid id"),
                            "404": error("Author not found")
                        }
                    },
                    "put": {
                        "summary": "Partially update an author",
                        "description": "Only supplied fields change. When every supplied value matches the stored row the response is a message and nothing is written.",
                        "tags": ["Authors"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/UpdateAuthor" }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Updated author, or a no-op message",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "oneOf": [
                                                { "$ref": "#/components/schemas/Author" },
                                                { "$ref": "#/components/schemas/Message" }
                                            ]
                                        }
                                    }
                                }
                            },
                            "400": error("Invalid id or fields"),
                            "404": error("Author not found")
                        }
                    },
                    "delete": {
                        "summary": "Delete an author without books",
                        "tags": ["Authors"],
                        "responses": {
                            "200": author("Deleted author snapshot"),
                            "400": error("Invalid id, or books still reference the author"),
                            "404": error("Author not found")
                        }
                    }
                },
                "/{id}/books": {
                    "parameters": id_param,
                    "get": {
                        "summary": "List an author's books",
                        "tags": ["Authors"],
                        "responses": {
                            "200": {
                                "description": "Books by the author",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/AuthorBook" }
                                        }
                                    }
                                }
                            },
                            "400": error("Invalid id"),
                            "404": error("Author not found")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Author": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "author": { "type": "string" },
                            "birthYear": { "type": "integer" },
                            "nationality": { "type": "string" }
                        },
                        "required": ["id", "author", "birthYear", "nationality"]
                    },
                    "CreateAuthor": {
                        "type": "object",
                        "properties": {
                            "author": { "type": "string", "minLength": 2, "maxLength": 100 },
                            "birthYear": { "type": "integer", "minimum": 0 },
                            "nationality": { "type": "string", "minLength": 2, "maxLength": 50 }
                        },
                        "required": ["author", "birthYear", "nationality"]
                    },
                    "UpdateAuthor": {
                        "type": "object",
                        "properties": {
                            "author": { "type": "string", "minLength": 2, "maxLength": 100 },
                            "birthYear": { "type": "integer", "minimum": 0 },
                            "nationality": { "type": "string", "minLength": 2, "maxLength": 50 }
                        },
                        "minProperties": 1
                    },
                    "AuthorBook": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "title": { "type": "string" },
                            "published": { "type": "integer" },
                            "author": { "type": "string" }
                        },
                        "required": ["id", "title", "published", "author"]
                    },
                    "Message": {
                        "type": "object",
                        "properties": {
                            "message": { "type": "string" }
                        },
                        "required": ["message"]
                    }
                }
            }
        }))
    }
}

/// Create a new instance of the authors module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(AuthorsModule::new())
}
