use std::fmt;

use clap::ValueEnum;
use petstore_client::ClientConfig;
use serde_json::json;

const WIDTH: usize = 40;

/// Language the usage snippets are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Style {
    Rust,
    Python,
    Typescript,
}

impl Style {
    fn language(&self) -> &'static str {
        match self {
            Style::Rust => "rust",
            Style::Python => "python",
            Style::Typescript => "typescript",
        }
    }
}

pub struct Operation {
    pub method: &'static str,
    pub path: &'static str,
    rust: &'static str,
    python: &'static str,
    typescript: &'static str,
}

impl Operation {
    pub fn call(&self, style: Style) -> &'static str {
        match style {
            Style::Rust => self.rust,
            Style::Python => self.python,
            Style::Typescript => self.typescript,
        }
    }
}

pub const OPERATIONS: &[Operation] = &[
    Operation {
        method: "GET",
        path: "/pets",
        rust: "api.list_pets(&params)",
        python: "client.get('/pets')",
        typescript: "listPets()",
    },
    Operation {
        method: "POST",
        path: "/pets",
        rust: "api.create_pet(&new_pet)",
        python: "client.post('/pets', json=data)",
        typescript: "createPet(data)",
    },
    Operation {
        method: "GET",
        path: "/pets/{id}",
        rust: "api.get_pet(id)",
        python: "client.get(f'/pets/{id}')",
        typescript: "getPet(id)",
    },
    Operation {
        method: "PUT",
        path: "/pets/{id}",
        rust: "api.update_pet(id, &update)",
        python: "client.put(f'/pets/{id}', json=data)",
        typescript: "updatePet(id, data)",
    },
    Operation {
        method: "DELETE",
        path: "/pets/{id}",
        rust: "api.delete_pet(id)",
        python: "client.delete(f'/pets/{id}')",
        typescript: "deletePet(id)",
    },
    Operation {
        method: "GET",
        path: "/store/inventory",
        rust: "api.get_inventory()",
        python: "client.get('/store/inventory')",
        typescript: "getInventory()",
    },
    Operation {
        method: "POST",
        path: "/store/orders",
        rust: "api.place_order(&order)",
        python: "client.post('/store/orders', json=data)",
        typescript: "placeOrder(data)",
    },
];

const RUST_USAGE: &str = r#"
// Create client instance
let api = PetstoreApi::new(ApiClient::from_config(&config)?);

// List pets with pagination
let pets = api.list_pets(&ListPets {
    limit: Some(10),
    offset: Some(0),
    status: Some(PetStatus::Available),
})?;

// Create a new pet
let new_pet = api.create_pet(&NewPet {
    name: "Buddy".into(),
    species: Some("dog".into()),
    breed: Some("Golden Retriever".into()),
    age: Some(3),
    tags: vec!["friendly".into(), "trained".into()],
})?;

// Update pet status
api.update_pet(new_pet.id, &PetUpdate {
    status: Some(PetStatus::Sold),
    ..Default::default()
})?;

// Place an order
let order = api.place_order(&NewOrder {
    pet_id: new_pet.id,
    quantity: 1,
})?;
"#;

const PYTHON_USAGE: &str = r#"
# Create client instance
client = ApiClient(
    base_url=config["base_url"],
    headers=config["headers"]
)

# List pets with pagination
pets = client.get('/pets', params={
    'limit': 10,
    'offset': 0,
    'status': 'available'
})

# Create a new pet
new_pet = client.post('/pets', json={
    'name': 'Buddy',
    'species': 'dog',
    'breed': 'Golden Retriever',
    'age': 3,
    'tags': ['friendly', 'trained']
})

# Update pet status
client.put(f'/pets/{new_pet["id"]}', json={
    'status': 'sold'
})

# Place an order
order = client.post('/store/orders', json={
    'petId': new_pet['id'],
    'quantity': 1
})
"#;

const TYPESCRIPT_USAGE: &str = r#"
// Create client instance
const client = new ApiClient(config);

// List pets with pagination
const pets = await client.get('/pets', {
  params: { limit: 10, offset: 0, status: 'available' }
});

// Create a new pet
const newPet = await client.post('/pets', {
  body: {
    name: 'Buddy',
    species: 'dog',
    breed: 'Golden Retriever',
    age: 3,
    tags: ['friendly', 'trained']
  }
});

// Update pet status
await client.put('/pets/' + newPet.id, {
  body: { status: 'sold' }
});

// Place an order
const order = await client.post('/store/orders', {
  body: { petId: newPet.id, quantity: 1 }
});
"#;

/// What the demo needs to know besides the client configuration.
pub struct DemoOptions {
    pub style: Style,
    /// Print the configuration block as pretty JSON.
    pub json: bool,
    /// Name of the external generator the instructions refer to.
    pub generator: String,
}

/// Writes the complete demo text into `out`.
pub fn write_demo(
    out: &mut impl fmt::Write,
    config: &ClientConfig,
    options: &DemoOptions,
) -> fmt::Result {
    let separator = "-".repeat(WIDTH);
    // the same header set the client sends
    let headers = json!(config.effective_headers());

    writeln!(out, "Petstore API Client Example ({})", options.style.language())?;
    writeln!(out, "{}", "=".repeat(WIDTH))?;
    writeln!(out)?;

    if options.json {
        let block = json!({ "base_url": config.base_url, "headers": headers });
        writeln!(out, "Configuration: {block:#}")?;
    } else {
        writeln!(out, "Configuration:")?;
        writeln!(out, "  base_url: {}", config.base_url)?;
        writeln!(out, "  headers: {headers}")?;
    }
    writeln!(out)?;
    writeln!(out, "{separator}")?;
    writeln!(out)?;

    writeln!(out, "Available Operations:")?;
    for op in OPERATIONS {
        writeln!(
            out,
            "  - {:<6} {:<16} → {}",
            op.method,
            op.path,
            op.call(options.style)
        )?;
    }
    writeln!(out)?;
    writeln!(out, "{separator}")?;
    writeln!(out)?;

    writeln!(out, "Example Usage Patterns:")?;
    let usage = match options.style {
        Style::Rust => RUST_USAGE,
        Style::Python => PYTHON_USAGE,
        Style::Typescript => TYPESCRIPT_USAGE,
    };
    writeln!(out, "{usage}")?;

    writeln!(out, "To run this example with a real API:")?;
    writeln!(
        out,
        "1. Run: {} generate -s ../specs/petstore.yaml -l {} -o ./generated",
        options.generator,
        options.style.language()
    )?;
    let (import_step, run_step) = match options.style {
        Style::Rust => (
            "Add the generated crate to your Cargo.toml",
            "cargo run -p petstore-demo -- --list-pets",
        ),
        Style::Python => ("Uncomment the import statement", "python example.py"),
        Style::Typescript => ("Uncomment the import statement", "npm run example"),
    };
    writeln!(out, "2. {import_step}")?;
    writeln!(out, "3. Update the base_url and token")?;
    writeln!(out, "4. Run: {run_step}")
}

pub fn render(config: &ClientConfig, options: &DemoOptions) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_demo(&mut out, config, options)?;
    Ok(out)
}
