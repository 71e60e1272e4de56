pub mod authors;
pub mod books;

use libris_kernel::ModuleRegistry;

/// Register all resource modules with the registry
pub fn register_all(registry: &mut ModuleRegistry) {
    registry.register(authors::create_module());
    registry.register(books::create_module());
}

/// Registry holding every resource module
pub fn registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    register_all(&mut registry);
    registry
}
