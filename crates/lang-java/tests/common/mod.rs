use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Minimal class file writer: a constant pool, supertypes and fields, no methods.
pub struct ClassBytes {
    name: String,
    super_name: Option<String>,
    interfaces: Vec<String>,
    fields: Vec<(String, String)>,
}

#[allow(dead_code)]
impl ClassBytes {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            super_name: Some("java/lang/Object".to_string()),
            interfaces: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn root(mut self) -> Self {
        self.super_name = None;
        self
    }

    pub fn extends(mut self, super_name: &str) -> Self {
        self.super_name = Some(super_name.to_string());
        self
    }

    pub fn implements(mut self, interface: &str) -> Self {
        self.interfaces.push(interface.to_string());
        self
    }

    pub fn field(mut self, name: &str, descriptor: &str) -> Self {
        self.fields.push((name.to_string(), descriptor.to_string()));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut pool = Pool::default();
        let this_class = pool.class(&self.name);
        let super_class = self.super_name.as_deref().map_or(0, |s| pool.class(s));
        let interfaces: Vec<u16> = self.interfaces.iter().map(|i| pool.class(i)).collect();
        let fields: Vec<(u16, u16)> = self
            .fields
            .iter()
            .map(|(n, d)| (pool.utf8(n), pool.utf8(d)))
            .collect();

        let mut out = Vec::new();
        out.extend_from_slice(&0xCAFE_BABEu32.to_be_bytes());
        out.extend_from_slice(&0u16.to_be_bytes()); // minor
        out.extend_from_slice(&52u16.to_be_bytes()); // major, Java 8
        out.extend_from_slice(&(pool.count + 1).to_be_bytes());
        out.extend_from_slice(&pool.bytes);
        out.extend_from_slice(&0x0021u16.to_be_bytes()); // public super
        out.extend_from_slice(&this_class.to_be_bytes());
        out.extend_from_slice(&super_class.to_be_bytes());
        out.extend_from_slice(&(interfaces.len() as u16).to_be_bytes());
        for index in interfaces {
            out.extend_from_slice(&index.to_be_bytes());
        }
        out.extend_from_slice(&(fields.len() as u16).to_be_bytes());
        for (name, descriptor) in fields {
            out.extend_from_slice(&0x0002u16.to_be_bytes()); // private
            out.extend_from_slice(&name.to_be_bytes());
            out.extend_from_slice(&descriptor.to_be_bytes());
            out.extend_from_slice(&0u16.to_be_bytes()); // attributes
        }
        out.extend_from_slice(&0u16.to_be_bytes()); // methods
        out.extend_from_slice(&0u16.to_be_bytes()); // attributes
        out
    }
}

#[derive(Default)]
struct Pool {
    bytes: Vec<u8>,
    count: u16,
}

impl Pool {
    fn utf8(&mut self, value: &str) -> u16 {
        self.bytes.push(1);
        self.bytes
            .extend_from_slice(&(value.len() as u16).to_be_bytes());
        self.bytes.extend_from_slice(value.as_bytes());
        self.count += 1;
        self.count
    }

    fn class(&mut self, name: &str) -> u16 {
        let name_index = self.utf8(name);
        self.bytes.push(7);
        self.bytes.extend_from_slice(&name_index.to_be_bytes());
        self.count += 1;
        self.count
    }
}

/// Writes `classes` into a jar at `path`, plus a manifest and a stray resource.
#[allow(dead_code)]
pub fn write_jar(path: &Path, classes: &[ClassBytes]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();

    zip.start_file("META-INF/MANIFEST.MF", options).unwrap();
    zip.write_all(b"Manifest-Version: 1.0\n").unwrap();
    zip.start_file("assets/lang/en_us.json", options).unwrap();
    zip.write_all(b"{}").unwrap();

    for class in classes {
        zip.start_file(format!("{}.class", class.name), options)
            .unwrap();
        zip.write_all(&class.build()).unwrap();
    }

    zip.finish().unwrap();
}
