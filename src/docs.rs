//! Interactive API documentation.
//!
//! `/openapi.json` serves a static OpenAPI 3.1 description of the routes.
//! `/docs` (Swagger UI) and `/redoc` (ReDoc) are HTML shells that load the
//! renderer from a CDN and point it at that document.

use serde_json::{Value, json};

use crate::response::{ContentType, Json, Response};
use crate::Request;

pub const OPENAPI_PATH: &str = "/openapi.json";
pub const TITLE: &str = "App Labs API";

const SWAGGER_UI: &str = r##"<!DOCTYPE html>
<html>
<head>
<title>{title} - Swagger UI</title>
<meta charset="utf-8">
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
<div id="swagger-ui"></div>
<script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
<script>
SwaggerUIBundle({ url: "{openapi}", dom_id: "#swagger-ui", deepLinking: true });
</script>
</body>
</html>
"##;

const REDOC: &str = r#"<!DOCTYPE html>
<html>
<head>
<title>{title} - ReDoc</title>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<style>body { margin: 0; padding: 0; }</style>
</head>
<body>
<redoc spec-url="{openapi}"></redoc>
<script src="https://cdn.jsdelivr.net/npm/redoc@2/bundles/redoc.standalone.js"></script>
</body>
</html>
"#;

fn page(template: &str) -> Response {
    let html = template
        .replace("{title}", TITLE)
        .replace("{openapi}", OPENAPI_PATH);
    Response::builder().bytes(ContentType::Html, html.into_bytes())
}

pub async fn swagger_ui(_req: Request) -> Response {
    page(SWAGGER_UI)
}

pub async fn redoc(_req: Request) -> Response {
    page(REDOC)
}

pub async fn openapi_json(_req: Request) -> Json<Value> {
    Json(openapi())
}

/// The OpenAPI document for every route the application registers.
pub fn openapi() -> Value {
    let item_id = json!({
        "name": "item_id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer" }
    });
    let item_body = json!({
        "required": true,
        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ItemInput" } } }
    });
    let item_ok = ok("Item", json!({ "$ref": "#/components/schemas/Item" }));
    let not_found = json!({
        "description": "Item not found",
        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Detail" } } }
    });
    let invalid = json!({
        "description": "Validation Error",
        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ValidationError" } } }
    });

    json!({
        "openapi": "3.1.0",
        "info": { "title": TITLE, "version": env!("CARGO_PKG_VERSION") },
        "paths": {
            "/": {
                "get": {
                    "summary": "Root",
                    "responses": { "200": ok("Greeting", json!({
                        "type": "object",
                        "properties": {
                            "message": { "type": "string" },
                            "version": { "type": "string" }
                        }
                    })) }
                }
            },
            "/health": {
                "get": {
                    "summary": "Health Check",
                    "responses": { "200": ok("Health", json!({
                        "type": "object",
                        "properties": { "status": { "type": "string" } }
                    })) }
                }
            },
            "/items": {
                "get": {
                    "summary": "List Items",
                    "responses": { "200": ok("Items", json!({
                        "type": "array",
                        "items": { "$ref": "#/components/schemas/Item" }
                    })) }
                },
                "post": {
                    "summary": "Create Item",
                    "requestBody": item_body,
                    "responses": { "200": item_ok, "422": invalid }
                }
            },
            "/items/{item_id}": {
                "get": {
                    "summary": "Get Item",
                    "parameters": [item_id],
                    "responses": { "200": item_ok, "404": not_found, "422": invalid }
                },
                "put": {
                    "summary": "Update Item",
                    "parameters": [item_id],
                    "requestBody": item_body,
                    "responses": { "200": item_ok, "404": not_found, "422": invalid }
                },
                "delete": {
                    "summary": "Delete Item",
                    "parameters": [item_id],
                    "responses": {
                        "200": ok("Deleted", json!({
                            "type": "object",
                            "properties": { "message": { "type": "string" } }
                        })),
                        "404": not_found,
                        "422": invalid
                    }
                }
            }
        },
        "components": { "schemas": schemas() }
    })
}

fn ok(description: &str, schema: Value) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": schema } }
    })
}

fn schemas() -> Value {
    json!({
        "Item": {
            "type": "object",
            "required": ["id", "name", "description", "price", "is_available"],
            "properties": {
                "id": { "type": "integer" },
                "name": { "type": "string", "minLength": 1 },
                "description": { "type": ["string", "null"] },
                "price": { "type": "number", "minimum": 0 },
                "is_available": { "type": "boolean" }
            }
        },
        "ItemInput": {
            "type": "object",
            "required": ["name", "price"],
            "properties": {
                "name": { "type": "string", "minLength": 1 },
                "description": { "type": ["string", "null"], "default": null },
                "price": { "type": "number", "minimum": 0 },
                "is_available": { "type": "boolean", "default": true }
            }
        },
        "Detail": {
            "type": "object",
            "properties": { "detail": { "type": "string" } }
        },
        "ValidationError": {
            "type": "object",
            "properties": {
                "detail": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "loc": { "type": "array", "items": { "type": ["string", "integer"] } },
                            "msg": { "type": "string" },
                            "type": { "type": "string" }
                        }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_item_operation() {
        let doc = openapi();
        let item = &doc["paths"]["/items/{item_id}"];
        for op in ["get", "put", "delete"] {
            assert!(item[op]["responses"]["404"].is_object(), "{op} lacks 404");
        }
        assert!(doc["paths"]["/items"]["post"]["responses"]["422"].is_object());
        assert_eq!(doc["info"]["version"], "0.1.0");
    }

    #[test]
    fn pages_point_at_the_document() {
        let res = page(REDOC);
        let html = std::str::from_utf8(res.body()).unwrap();
        assert!(html.contains(r#"spec-url="/openapi.json""#));
        assert_eq!(res.header("content-type"), Some("text/html; charset=utf-8"));

        let res = page(SWAGGER_UI);
        let html = std::str::from_utf8(res.body()).unwrap();
        assert!(html.contains(r##"dom_id: "#swagger-ui""##));
        assert!(html.contains(r#"url: "/openapi.json""#));
        assert!(html.ends_with("</html>\n"));
    }
}
