use namebridge_core::{MappingTable, NameRecord};
use std::path::Path;

pub fn run(path: &Path, class: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let table = MappingTable::load(path)?;

    match class {
        Some(name) => {
            let record = table
                .get(name)
                .or_else(|| table.by_canonical(name))
                .ok_or_else(|| format!("No class named {name} in {}", path.display()))?;
            print_record(record);
        }
        None => {
            println!("{} classes", table.len());
            for record in table.iter() {
                println!(
                    "{} -> {} ({} methods, {} fields, {} constructors)",
                    record.origin_name,
                    record.canonical_name,
                    record.methods.len(),
                    record.fields.len(),
                    record.constructors.len()
                );
            }
        }
    }

    Ok(())
}

fn print_record(record: &NameRecord) {
    println!("{} -> {}", record.origin_name, record.canonical_name);
    for constructor in &record.constructors {
        println!("  {constructor}");
    }
    for (key, name) in &record.methods {
        println!("  method {key} -> {name}");
    }
    for (key, name) in &record.fields {
        println!("  field  {key} -> {name}");
    }
}
