//! Seed projects for each supported starting template.
//!
//! Pure functions of the template identifier; each seed produces a
//! conforming `Project` (unique node ids, tabs resolving to files, active
//! file among the tabs).

use crate::project::{generate_file_id, FileNode, Project};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    JavaScript,
    Website,
    React,
    Bootstrap,
    Python,
    Flask,
    DataScience,
    Sql,
    Empty,
}

impl Template {
    pub const ALL: [Template; 9] = [
        Template::JavaScript,
        Template::Website,
        Template::React,
        Template::Bootstrap,
        Template::Python,
        Template::Flask,
        Template::DataScience,
        Template::Sql,
        Template::Empty,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Template::JavaScript => "javascript",
            Template::Website => "website",
            Template::React => "react",
            Template::Bootstrap => "bootstrap",
            Template::Python => "python",
            Template::Flask => "flask",
            Template::DataScience => "data-science",
            Template::Sql => "sql",
            Template::Empty => "empty",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Template::JavaScript => "JavaScript Project",
            Template::Website => "HTML Website",
            Template::React => "React App",
            Template::Bootstrap => "Bootstrap Site",
            Template::Python => "Python Basic",
            Template::Flask => "Flask Web App",
            Template::DataScience => "Data Science",
            Template::Sql => "SQL Project",
            Template::Empty => "Empty Project",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Template::JavaScript => "Plain JavaScript playground with a single script",
            Template::Website => "Static web page with separate HTML, CSS and JS files",
            Template::React => "React component demo with JSX sources",
            Template::Bootstrap => "Static site styled with the Bootstrap CDN",
            Template::Python => "Plain Python script",
            Template::Flask => "Flask web application with an API endpoint and a template",
            Template::DataScience => "Tabular data analysis with pandas and numpy",
            Template::Sql => "SQL query scratchpad",
            Template::Empty => "Start from scratch with no files",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|template| template.id() == id)
    }

    /// Build the seed project for this template.
    pub fn seed(self) -> Project {
        match self {
            Template::JavaScript => seed_javascript(),
            Template::Website => seed_website(),
            Template::React => seed_react(),
            Template::Bootstrap => seed_bootstrap(),
            Template::Python => seed_python(),
            Template::Flask => seed_flask(),
            Template::DataScience => seed_data_science(),
            Template::Sql => seed_sql(),
            Template::Empty => seed_empty(),
        }
    }
}

fn seed_javascript() -> Project {
    let main = FileNode::file(
        "main.js",
        "// Write your JavaScript code here\nconsole.log('Hello, World!');\n",
    );
    let main_id = main.id.clone();
    Project {
        id: generate_file_id(),
        name: "New JavaScript Project".to_string(),
        open_tabs: vec![main_id.clone()],
        active_file: Some(main_id),
        files: vec![main],
    }
}

fn seed_website() -> Project {
    let index = FileNode::file(
        "index.html",
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>My Website</title>
    <link rel="stylesheet" href="styles.css">
</head>
<body>
    <h1>Welcome</h1>
    <p>Edit this page and watch the preview update.</p>
    <script src="script.js"></script>
</body>
</html>
"#,
    );
    let styles = FileNode::file(
        "styles.css",
        "body {\n    font-family: sans-serif;\n    margin: 2rem;\n}\n\nh1 {\n    color: #2563eb;\n}\n",
    );
    let script = FileNode::file(
        "script.js",
        "// Page behavior\nconsole.log('Website loaded');\n",
    );
    let index_id = index.id.clone();
    Project {
        id: generate_file_id(),
        name: "My Website".to_string(),
        open_tabs: vec![index_id.clone()],
        active_file: Some(index_id),
        files: vec![index, styles, script],
    }
}

fn seed_react() -> Project {
    let app = FileNode::file(
        "App.jsx",
        r#"import React, { useState } from 'react';

export default function App() {
    const [count, setCount] = useState(0);

    return (
        <div>
            <h1>Counter: {count}</h1>
            <button onClick={() => setCount(count + 1)}>Increment</button>
        </div>
    );
}
"#,
    );
    let entry = FileNode::file(
        "index.jsx",
        "import React from 'react';\nimport { createRoot } from 'react-dom/client';\nimport App from './App';\n\ncreateRoot(document.getElementById('root')).render(<App />);\n",
    );
    let html = FileNode::file(
        "index.html",
        "<!DOCTYPE html>\n<html>\n<head>\n    <title>React App</title>\n</head>\n<body>\n    <div id=\"root\"></div>\n</body>\n</html>\n",
    );
    let app_id = app.id.clone();
    let mut src = FileNode::folder("src", vec![app, entry]);
    src.is_expanded = true;
    Project {
        id: generate_file_id(),
        name: "New React App".to_string(),
        open_tabs: vec![app_id.clone()],
        active_file: Some(app_id),
        files: vec![src, html],
    }
}

fn seed_bootstrap() -> Project {
    let index = FileNode::file(
        "index.html",
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Bootstrap Site</title>
    <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css" rel="stylesheet">
    <link rel="stylesheet" href="custom.css">
</head>
<body>
    <div class="container py-5">
        <h1 class="display-4">Hello, Bootstrap!</h1>
        <button class="btn btn-primary">Get Started</button>
    </div>
</body>
</html>
"#,
    );
    let custom = FileNode::file(
        "custom.css",
        "/* Overrides on top of Bootstrap */\n.display-4 {\n    color: #6f42c1;\n}\n",
    );
    let index_id = index.id.clone();
    Project {
        id: generate_file_id(),
        name: "Bootstrap Site".to_string(),
        open_tabs: vec![index_id.clone()],
        active_file: Some(index_id),
        files: vec![index, custom],
    }
}

fn seed_python() -> Project {
    let main = FileNode::file(
        "main.py",
        "# Write your Python code here\nprint(\"Hello, World!\")\n",
    );
    let main_id = main.id.clone();
    Project {
        id: generate_file_id(),
        name: "New Python Project".to_string(),
        open_tabs: vec![main_id.clone()],
        active_file: Some(main_id),
        files: vec![main],
    }
}

fn seed_flask() -> Project {
    let app = FileNode::file(
        "app.py",
        r#"from flask import Flask, jsonify, render_template

app = Flask(__name__)


@app.route("/")
def index():
    return render_template("index.html")


@app.route("/api/greet")
def greet():
    return jsonify(message="Hello from Flask!")


if __name__ == "__main__":
    app.run(debug=True)
"#,
    );
    let page = FileNode::file(
        "index.html",
        "<!DOCTYPE html>\n<html>\n<head>\n    <title>Flask App</title>\n</head>\n<body>\n    <h1>{{ message or \"Hello from Flask!\" }}</h1>\n</body>\n</html>\n",
    );
    let app_id = app.id.clone();
    let mut templates_dir = FileNode::folder("templates", vec![page]);
    templates_dir.is_expanded = true;
    Project {
        id: generate_file_id(),
        name: "Flask Web App".to_string(),
        open_tabs: vec![app_id.clone()],
        active_file: Some(app_id),
        files: vec![app, templates_dir],
    }
}

fn seed_data_science() -> Project {
    let analysis = FileNode::file(
        "analysis.py",
        r#"import pandas as pd
import numpy as np

# Generate sample sales data
rng = np.random.default_rng(42)
data = pd.DataFrame({
    "date": pd.date_range("2023-01-01", periods=365),
    "sales": rng.normal(1000, 120, 365).round(2),
    "customers": rng.integers(20, 80, 365),
})

print("Total revenue:", data["sales"].sum().round(2))
print("Average daily sales:", data["sales"].mean().round(2))
print("Average customers per day:", data["customers"].mean().round(1))
"#,
    );
    let notes = FileNode::file(
        "README.md",
        "# Data Science Demo\n\nRun `analysis.py` to compute summary statistics over a\ngenerated sales dataset.\n",
    );
    let analysis_id = analysis.id.clone();
    Project {
        id: generate_file_id(),
        name: "Data Science".to_string(),
        open_tabs: vec![analysis_id.clone()],
        active_file: Some(analysis_id),
        files: vec![analysis, notes],
    }
}

fn seed_sql() -> Project {
    let main = FileNode::file(
        "main.sql",
        "-- Write your SQL queries here\nSELECT 'Hello, World!' AS message;\n",
    );
    let main_id = main.id.clone();
    Project {
        id: generate_file_id(),
        name: "New SQL Project".to_string(),
        open_tabs: vec![main_id.clone()],
        active_file: Some(main_id),
        files: vec![main],
    }
}

fn seed_empty() -> Project {
    Project {
        id: generate_file_id(),
        name: "New Project".to_string(),
        files: Vec::new(),
        open_tabs: Vec::new(),
        active_file: None,
    }
}
