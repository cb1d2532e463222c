//! Handlebars templates for the catalog pages.

use handlebars::Handlebars;

use crate::core::errors::{ProdsimError, Result};

/// Paginated product grid with the autocomplete search bar.
pub const HOME: &str = r#"<!doctype html>
<html lang="en">
<head>
    <title>Product Listing</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css">
    <style>
        .image-box {
            height: 250px;
            display: flex;
            align-items: center;
            justify-content: center;
            background: #f8f9fa;
            font-size: 14px;
            color: #666;
        }
        .image-box img {
            max-height: 100%;
            max-width: 100%;
            object-fit: contain;
        }
        #suggestions {
            position: absolute;
            background: white;
            border: 1px solid #ddd;
            max-height: 200px;
            overflow-y: auto;
            width: 100%;
            z-index: 1000;
        }
        #suggestions div {
            padding: 8px;
            cursor: pointer;
        }
        #suggestions div:hover {
            background: #f0f0f0;
        }
    </style>
</head>
<body class="bg-light">
    <div class="container my-4">
        <h2 class="mb-4">Product Listing</h2>

        <div class="mb-4 position-relative">
            <input type="text" id="search" class="form-control" placeholder="Search product by title...">
            <div id="suggestions"></div>
        </div>

        <div class="row g-4">
            {{#each products}}
                <div class="col-md-3">
                    <div class="card h-100 shadow-sm">
                        <div class="image-box">
                            {{#if image}}
                                <img src="{{image}}" alt="Product Image">
                            {{else}}
                                <span>No Image Available</span>
                            {{/if}}
                        </div>
                        <div class="card-body">
                            <h6 class="card-title">{{title}}</h6>
                            <p class="text-muted">{{brand}}</p>
                            <p class="fw-bold">{{#if price}}{{price}}{{/if}}</p>
                            {{#if asin}}
                                <a href="/product/{{asin}}" class="btn btn-primary btn-sm">View Details</a>
                            {{/if}}
                        </div>
                    </div>
                </div>
            {{/each}}
        </div>

        <nav class="mt-4">
            <ul class="pagination justify-content-center">
                {{#if has_prev}}
                    <li class="page-item"><a class="page-link" href="/?page={{prev_page}}">Previous</a></li>
                {{/if}}
                <li class="page-item disabled"><a class="page-link">Page {{page}} of {{total_pages}}</a></li>
                {{#if has_next}}
                    <li class="page-item"><a class="page-link" href="/?page={{next_page}}">Next</a></li>
                {{/if}}
            </ul>
        </nav>
    </div>

    <script>
    document.getElementById("search").addEventListener("input", function() {
        let query = this.value;
        let suggestionsBox = document.getElementById("suggestions");
        suggestionsBox.innerHTML = "";
        if (query.length < 2) return;

        fetch("/search?query=" + encodeURIComponent(query))
            .then(res => res.json())
            .then(data => {
                suggestionsBox.innerHTML = "";
                data.forEach(item => {
                    let div = document.createElement("div");
                    div.textContent = item.title;
                    div.onclick = () => window.location.href = "/product/" + item.asin;
                    suggestionsBox.appendChild(div);
                });
            });
    });
    </script>
</body>
</html>
"#;

/// Product detail page with the similar-products panel.
pub const DETAIL: &str = r#"<!doctype html>
<html lang="en">
<head>
    <title>{{title}}</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css">
    <style>
        .image-box {
            height: 300px;
            display: flex;
            align-items: center;
            justify-content: center;
            background: #f8f9fa;
        }
        .image-box img {
            max-height: 100%;
            max-width: 100%;
            object-fit: contain;
        }
        .similar-card .image-box {
            height: 150px;
        }
    </style>
</head>
<body class="bg-light">
    <div class="container my-4">
        <a href="/" class="btn btn-secondary mb-3">&#11013; Back to Products</a>
        <div class="card shadow p-4 mb-4">
            <div class="row">
                <div class="col-md-5">
                    <div class="image-box">
                        {{#if image}}
                            <img src="{{image}}" class="img-fluid">
                        {{else}}
                            <span>No Image Available</span>
                        {{/if}}
                    </div>
                </div>
                <div class="col-md-7">
                    <h3>{{title}}</h3>
                    <p><strong>ASIN:</strong> {{asin}}</p>
                    <p><strong>Brand:</strong> {{brand}}</p>
                    <p><strong>Category:</strong> {{category}}</p>
                    <p><strong>Price:</strong> {{#if price}}{{price}}{{else}}${{/if}}</p>
                    <p><strong>Date:</strong> {{date}}</p>

                    <h5>Features:</h5>
                    <ul>
                        {{#each features}}
                            <li>{{this}}</li>
                        {{/each}}
                    </ul>

                    <h5>Description:</h5>
                    <p>{{description}}</p>

                    <h5>Other Details:</h5>
                    <ul>
                        {{#if also_buy}}
                            <li><strong>Also bought:</strong> {{also_buy}}</li>
                        {{/if}}
                        {{#if also_view}}
                            <li><strong>Also viewed:</strong> {{also_view}}</li>
                        {{/if}}
                    </ul>
                </div>
            </div>
        </div>

        <h4 class="mb-3">Find Similar Products</h4>
        <div class="btn-group mb-4">
            <a href="/product/{{asin}}?similarity=pst" class="btn btn-outline-primary">Products with Similar Title (PST)</a>
            <a href="/product/{{asin}}?similarity=psd" class="btn btn-outline-primary">Products with Similar Description (PSD)</a>
            <a href="/product/{{asin}}?similarity=pstd" class="btn btn-outline-primary">Products with Similar Title &amp; Description (PSTD)</a>
        </div>

        {{#if similar}}
            <h5>Top 10 Similar Products</h5>
            <div class="row g-4">
                {{#each similar}}
                    <div class="col-md-3">
                        <div class="card h-100 shadow-sm similar-card">
                            <div class="image-box">
                                {{#if image}}
                                    <img src="{{image}}" alt="Product Image">
                                {{else}}
                                    <span>No Image</span>
                                {{/if}}
                            </div>
                            <div class="card-body">
                                <h6 class="card-title">{{title}}</h6>
                                <p class="text-muted">Similarity: {{score}}%</p>
                                <a href="/product/{{asin}}" class="btn btn-primary btn-sm">View Details</a>
                            </div>
                        </div>
                    </div>
                {{/each}}
            </div>
        {{/if}}
    </div>
</body>
</html>
"#;

/// Build a registry with all page templates registered.
pub fn registry() -> Result<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();
    handlebars
        .register_template_string("home", HOME)
        .map_err(|e| ProdsimError::template("cannot register home template", e))?;
    handlebars
        .register_template_string("detail", DETAIL)
        .map_err(|e| ProdsimError::template("cannot register detail template", e))?;
    Ok(handlebars)
}
