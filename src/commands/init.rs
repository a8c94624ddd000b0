//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    if target_dir.join("_config.yml").exists() {
        anyhow::bail!("A site already exists in {:?}", target_dir);
    }

    // Create directory structure
    fs::create_dir_all(target_dir.join("posts"))?;
    fs::create_dir_all(target_dir.join("public"))?;

    let config_content = r#"# Site
title: Folio
subtitle: ''
author: John Doe
url: http://example.com

# Directory
posts_dir: posts
photos_file: photos.json
public_dir: public

# Blog
blog_root: /blogs
recent_limit: 5
highlight:
  theme: base16-ocean.dark
  line_number: false

# Gallery images served over plain http are rewritten.
# strategy: direct | resize | relay
image:
  strategy: relay
  endpoint: /api/proxy-image
"#;

    fs::write(target_dir.join("_config.yml"), config_content)?;

    let created = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let sample_post = format!(
        r#"---
title: Hello World
created: {created}
updated: {created}
category: Notes
summary: The first post of this site.
tags:
- welcome
---

Welcome! Every post lives in `posts/` as a markdown file that starts with a
header like the one above. `title`, `created` and `category` are required.

```bash
$ folio new "My New Post" --category Notes --tag rust
$ folio list post --tag rust
$ folio server
```
"#
    );

    fs::write(target_dir.join("posts/hello-world.md"), sample_post)?;

    let photos = r#"{
  "photos": [
    {
      "id": "1",
      "urls": ["https://picsum.photos/id/1015/1200/800"],
      "title": "River Valley",
      "description": "A sample gallery entry",
      "category": "Landscape",
      "created": "2024-01-01"
    }
  ]
}
"#;

    fs::write(target_dir.join("photos.json"), photos)?;

    Ok(())
}
