//! Built-in demo catalog.
//!
//! A small web-project feature set used when no catalog is configured. It
//! exercises every relation kind: a non-removable base, layered
//! dependencies, dev-only dependencies and mutual conflicts.

use trellis_core::domain::{DomainError, Feature, FeatureCatalog, FeatureCategory};

/// Build the built-in catalog.
pub fn builtin_catalog() -> Result<FeatureCatalog, DomainError> {
    FeatureCatalog::new(all_features()?)
}

/// Every built-in feature, dependencies listed before dependents.
pub fn all_features() -> Result<Vec<Feature>, DomainError> {
    use FeatureCategory::{Framework, Library, Other, Tool};

    Ok(vec![
        Feature::builder("core")
            .name("Project core")
            .description("Entry point, configuration and build setup")
            .category(Framework)
            .removable(false)
            .files(["package.json", "src/index.ts", "tsconfig.json"])
            .build()?,
        Feature::builder("react")
            .name("React")
            .category(Framework)
            .dependency("core")
            .files(["src/App.tsx", "src/main.tsx", "index.html"])
            .build()?,
        Feature::builder("router")
            .name("Client-side routing")
            .category(Library)
            .dependency("react")
            .files(["src/routes.tsx", "src/pages/Home.tsx", "src/pages/NotFound.tsx"])
            .build()?,
        Feature::builder("state")
            .name("State management")
            .category(Library)
            .dependency("react")
            .files(["src/store/index.ts"])
            .build()?,
        Feature::builder("api-client")
            .name("HTTP API client")
            .category(Library)
            .dependency("core")
            .dev_dependency("test-utils")
            .files(["src/api/client.ts", "src/api/types.ts"])
            .build()?,
        Feature::builder("auth")
            .name("Authentication")
            .category(Library)
            .dependencies(["router", "api-client"])
            .files([
                "src/auth/AuthProvider.tsx",
                "src/auth/useSession.ts",
                "src/pages/Login.tsx",
            ])
            .build()?,
        Feature::builder("tailwind")
            .name("Tailwind CSS")
            .category(Tool)
            .dependency("core")
            .conflict("styled-components")
            .files(["tailwind.config.js", "postcss.config.js", "src/index.css"])
            .build()?,
        Feature::builder("styled-components")
            .name("styled-components")
            .category(Library)
            .dependency("react")
            .conflict("tailwind")
            .files(["src/theme.ts"])
            .build()?,
        Feature::builder("eslint")
            .name("ESLint")
            .category(Tool)
            .files([".eslintrc.json"])
            .build()?,
        Feature::builder("prettier")
            .name("Prettier")
            .category(Tool)
            .files([".prettierrc"])
            .build()?,
        Feature::builder("test-utils")
            .name("Shared test helpers")
            .files(["test/setup.ts"])
            .build()?,
        Feature::builder("jest")
            .name("Jest")
            .category(Tool)
            .dev_dependency("test-utils")
            .conflict("vitest")
            .files(["jest.config.js"])
            .build()?,
        Feature::builder("vitest")
            .name("Vitest")
            .category(Tool)
            .dev_dependency("test-utils")
            .conflict("jest")
            .files(["vitest.config.ts"])
            .build()?,
        Feature::builder("storybook")
            .name("Storybook")
            .category(Tool)
            .dependency("react")
            .files([".storybook/main.ts", ".storybook/preview.ts"])
            .build()?,
        Feature::builder("docker")
            .name("Docker")
            .description("Container build for deployment")
            .files(["Dockerfile", ".dockerignore"])
            .build()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::domain::GraphBuilder;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = builtin_catalog().unwrap();
        assert_eq!(catalog.len(), 15);
    }

    #[test]
    fn builtin_references_all_resolve() {
        let catalog = builtin_catalog().unwrap();
        let graph = GraphBuilder::new(&catalog).build();
        assert!(graph.unresolved().is_empty());
        assert_eq!(graph.node("auth").unwrap().level, 4);
    }
}
