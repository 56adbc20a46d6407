#![allow(dead_code)]

pub const CDN_URL: &str = "https://cdn.example.com";

pub const LEGACY_HOSTS: &[&str] = &["old", "old.example.com"];

pub const RENDER_CONFIG: &str = r#"cdn:
  url: "https://cdn.example.com"
  legacy_hosts:
    - old
    - old.example.com
highlight:
  default_language: plaintext
cache:
  capacity: 8
limits:
  max_depth: 256
"#;

pub const GALLERY_POST: &str = r#"<p>Intro <img src="http://old/one.jpg" alt="First"></p>
<h2>Heading with <img src="http://old/hidden.jpg"> inside</h2>
<figure><img src="//old.example.com/two.png" title="Second"><figcaption>caption</figcaption></figure>
<img alt="no source">
<pre><img src="http://old/in-pre.jpg"></pre>
<div><div><img src="https://elsewhere.net/three.gif"></div></div>"#;

pub const CODE_POST: &str = r#"<p>Example:</p>
<pre><code class="language-ts">const x = 1;</code></pre>
<pre>raw text, no code child</pre>"#;

pub const VIDEO_POST: &str =
    r#"<video poster="http://old/a.jpg"><source src="http://old/b.mp4"/><source/></video>"#;

pub const HEADING_POST: &str = r#"<h2 id="intro" class="title"><b>Bold</b> text</h2>"#;

pub const SNIPPET_RS: &str = "fn main() {\n    println!(\"hi\");\n}\n";
