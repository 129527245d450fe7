//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::cli::server::{serve, ServerConfig};
use crate::docs::{build_document, DocsInfo};
use crate::error::{Error, Result};
use crate::schema::{collections, lookup, ResourceSchema, ALL};
use crate::store::StoreUrl;
use serde_json::{json, Value};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Serve {
                port,
                host,
                store_url,
                api_key,
                public_url,
            } => {
                let config = ServerConfig {
                    host: host.clone(),
                    port: *port,
                    store_url: store_url.clone(),
                    api_key: api_key.clone(),
                    public_url: public_url.clone(),
                };
                serve(config).await
            }
            Commands::Docs { public_url } => self.docs(public_url),
            Commands::Resources { collection } => self.resources(collection.as_deref()),
            Commands::Check { store_url } => self.check(store_url).await,
        }
    }

    /// Print the OpenAPI document
    fn docs(&self, public_url: &str) -> Result<()> {
        let document = build_document(&DocsInfo::new(public_url), &ALL);
        self.output(&document)
    }

    /// Describe the department resources
    fn resources(&self, collection: Option<&str>) -> Result<()> {
        let schemas: Vec<&ResourceSchema> = match collection {
            Some(name) => vec![lookup(name)
                .ok_or_else(|| Error::config(format!("Unknown collection '{name}'")))?],
            None => ALL.to_vec(),
        };

        let resources: Vec<Value> = schemas.iter().map(|s| describe(s)).collect();
        self.output(&json!({ "resources": resources }))
    }

    /// Open the store and round-trip a listing on every collection
    async fn check(&self, store_url: &str) -> Result<()> {
        let url = StoreUrl::parse(store_url)?;
        let collections = collections();

        let status = match url.open(&collections) {
            Ok(store) => {
                let mut failure = None;
                for collection in &collections {
                    if let Err(e) = store.find_all(collection).await {
                        failure = Some(e.to_string());
                        break;
                    }
                }
                match failure {
                    None => json!({ "status": "SUCCEEDED", "store": store.kind() }),
                    Some(message) => json!({ "status": "FAILED", "message": message }),
                }
            }
            Err(e) => json!({ "status": "FAILED", "message": e.to_string() }),
        };

        self.output(&status)?;

        if status["status"] == "FAILED" {
            return Err(Error::store(format!("Store check failed for {url}")));
        }
        Ok(())
    }

    /// Print a JSON value, pretty when verbose
    fn output(&self, value: &Value) -> Result<()> {
        let text = if self.cli.verbose {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        println!("{text}");
        Ok(())
    }
}

fn describe(schema: &ResourceSchema) -> Value {
    let fields: Vec<Value> = schema
        .fields
        .iter()
        .map(|f| {
            json!({
                "name": f.name,
                "type": f.field_type.json_type_name(),
                "required": f.required,
                "description": f.description,
            })
        })
        .collect();

    json!({
        "collection": schema.collection,
        "model": schema.model,
        "path": schema.base_path(),
        "fields": fields,
    })
}
