//! Built-in sample snippets and collections for first-run seeding.

use crate::language::Language;
use crate::models::SnippetDraft;
use crate::store::{SnippetStore, StoreResult};

pub struct SampleSnippet {
    pub title: &'static str,
    pub description: &'static str,
    pub code: &'static str,
    pub language: Language,
    pub tags: &'static [&'static str],
    pub collection: Option<&'static str>,
    pub is_favorite: bool,
    pub is_pinned: bool,
}

pub struct SampleCollection {
    pub name: &'static str,
    pub description: &'static str,
    pub color: &'static str,
}

pub const SAMPLE_SNIPPETS: &[SampleSnippet] = &[
    SampleSnippet {
        title: "React useState Hook",
        description: "Basic state management in React functional components",
        code: "const [count, setCount] = useState(0);\n\nconst increment = () => {\n  setCount(count + 1);\n};\n\nconst decrement = () => {\n  setCount(prev => prev - 1);\n};",
        language: Language::Javascript,
        tags: &["react", "hooks", "state"],
        collection: Some("React Hooks"),
        is_favorite: true,
        is_pinned: true,
    },
    SampleSnippet {
        title: "Python List Comprehension",
        description: "Elegant way to create lists in Python",
        code: "# Basic list comprehension\nsquares = [x**2 for x in range(10)]\n\n# With condition\neven_squares = [x**2 for x in range(10) if x % 2 == 0]\n\n# Nested comprehension\nmatrix = [[i*j for j in range(3)] for i in range(3)]",
        language: Language::Python,
        tags: &["python", "list-comprehension", "functional"],
        collection: Some("Python Basics"),
        is_favorite: false,
        is_pinned: false,
    },
    SampleSnippet {
        title: "CSS Flexbox Center",
        description: "Center content both horizontally and vertically",
        code: ".container {\n  display: flex;\n  justify-content: center;\n  align-items: center;\n  min-height: 100vh;\n}\n\n/* Alternative with margin auto */\n.centered {\n  margin: auto;\n}",
        language: Language::Css,
        tags: &["css", "flexbox", "center", "layout"],
        collection: None,
        is_favorite: true,
        is_pinned: false,
    },
    SampleSnippet {
        title: "Git Common Commands",
        description: "Most frequently used Git commands for daily workflow",
        code: "# Clone repository\ngit clone <repository-url>\n\n# Check status\ngit status\n\n# Add changes\ngit add .\ngit add <file-name>\n\n# Commit changes\ngit commit -m \"commit message\"\n\n# Push to remote\ngit push origin main\n\n# Pull latest changes\ngit pull origin main\n\n# Create and switch to new branch\ngit checkout -b feature-branch\n\n# Merge branch\ngit checkout main\ngit merge feature-branch",
        language: Language::Bash,
        tags: &["git", "version-control", "commands"],
        collection: Some("Git & Version Control"),
        is_favorite: false,
        is_pinned: false,
    },
    SampleSnippet {
        title: "TypeScript Interface Example",
        description: "Defining interfaces for type safety in TypeScript",
        code: "interface User {\n  id: number;\n  name: string;\n  email: string;\n  age?: number; // Optional property\n  roles: string[];\n}\n\ninterface ApiResponse<T> {\n  data: T;\n  status: number;\n  message: string;\n}\n\n// Usage\nconst user: User = {\n  id: 1,\n  name: \"John Doe\",\n  email: \"john@example.com\",\n  roles: [\"user\", \"admin\"]\n};\n\nconst response: ApiResponse<User[]> = {\n  data: [user],\n  status: 200,\n  message: \"Success\"\n};",
        language: Language::Typescript,
        tags: &["typescript", "interface", "types"],
        collection: Some("TypeScript"),
        is_favorite: true,
        is_pinned: false,
    },
    SampleSnippet {
        title: "Docker Compose Setup",
        description: "Basic Docker Compose configuration for web app with database",
        code: "version: '3.8'\n\nservices:\n  web:\n    build: .\n    ports:\n      - \"3000:3000\"\n    environment:\n      - NODE_ENV=production\n      - DATABASE_URL=postgresql://user:password@db:5432/myapp\n    depends_on:\n      - db\n    volumes:\n      - .:/app\n      - /app/node_modules\n\n  db:\n    image: postgres:15\n    environment:\n      - POSTGRES_DB=myapp\n      - POSTGRES_USER=user\n      - POSTGRES_PASSWORD=password\n    ports:\n      - \"5432:5432\"\n    volumes:\n      - postgres_data:/var/lib/postgresql/data\n\nvolumes:\n  postgres_data:",
        language: Language::Yaml,
        tags: &["docker", "docker-compose", "postgres", "deployment"],
        collection: Some("DevOps"),
        is_favorite: false,
        is_pinned: false,
    },
    SampleSnippet {
        title: "SQL Query Examples",
        description: "Common SQL queries for data analysis and manipulation",
        code: "-- Select with joins\nSELECT u.name, p.title, p.created_at\nFROM users u\nJOIN posts p ON u.id = p.user_id\nWHERE u.active = true\nORDER BY p.created_at DESC;\n\n-- Group by with aggregate functions\nSELECT category, COUNT(*) as post_count, AVG(views) as avg_views\nFROM posts\nWHERE created_at >= '2024-01-01'\nGROUP BY category\nHAVING COUNT(*) > 5;\n\n-- Common table expression (CTE)\nWITH popular_posts AS (\n  SELECT * FROM posts WHERE views > 1000\n)\nSELECT category, COUNT(*) as popular_count\nFROM popular_posts\nGROUP BY category;",
        language: Language::Sql,
        tags: &["sql", "database", "queries", "joins"],
        collection: Some("Database"),
        is_favorite: false,
        is_pinned: false,
    },
];

pub const SAMPLE_COLLECTIONS: &[SampleCollection] = &[
    SampleCollection {
        name: "React Hooks",
        description: "React hooks and patterns",
        color: "#61DAFB",
    },
    SampleCollection {
        name: "Python Basics",
        description: "Essential Python snippets",
        color: "#3776AB",
    },
    SampleCollection {
        name: "Git & Version Control",
        description: "Git commands and workflows",
        color: "#F05032",
    },
    SampleCollection {
        name: "TypeScript",
        description: "TypeScript examples and patterns",
        color: "#3178C6",
    },
    SampleCollection {
        name: "DevOps",
        description: "DevOps tools and configurations",
        color: "#FF6B35",
    },
    SampleCollection {
        name: "Database",
        description: "SQL queries and database snippets",
        color: "#336791",
    },
];

/// Seed the sample catalog into `store` unless it already holds snippets.
///
/// Returns whether anything was seeded.
pub fn load_sample_data(store: &SnippetStore) -> StoreResult<bool> {
    if store.snippet_count() > 0 {
        return Ok(false);
    }
    seed_sample_data(store)?;
    Ok(true)
}

/// Seed the sample catalog unconditionally, on top of whatever is present.
pub fn seed_sample_data(store: &SnippetStore) -> StoreResult<()> {
    for collection in SAMPLE_COLLECTIONS {
        store.create_collection(
            collection.name,
            Some(collection.description),
            Some(collection.color),
        )?;
    }

    for sample in SAMPLE_SNIPPETS {
        let snippet = store.create_snippet(SnippetDraft {
            title: sample.title.to_string(),
            code: sample.code.to_string(),
            description: Some(sample.description.to_string()),
            language: Some(sample.language),
            tags: sample.tags.iter().map(|t| t.to_string()).collect(),
            collection: sample.collection.map(str::to_string),
        })?;
        if sample.is_favorite {
            store.toggle_favorite(snippet.id)?;
        }
        if sample.is_pinned {
            store.toggle_pinned(snippet.id)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeds_only_when_empty() {
        let store = SnippetStore::open_in_memory();
        assert!(load_sample_data(&store).unwrap());
        assert_eq!(store.snippet_count(), SAMPLE_SNIPPETS.len());
        assert_eq!(store.collections().len(), SAMPLE_COLLECTIONS.len());

        // A second load is a no-op.
        assert!(!load_sample_data(&store).unwrap());
        assert_eq!(store.snippet_count(), SAMPLE_SNIPPETS.len());
    }

    #[test]
    fn test_sample_flags_survive_seeding() {
        let store = SnippetStore::open_in_memory();
        load_sample_data(&store).unwrap();

        let pinned = store
            .all_snippets()
            .into_iter()
            .find(|s| s.title == "React useState Hook")
            .unwrap();
        assert!(pinned.is_favorite);
        assert!(pinned.is_pinned);
    }
}
