// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The single upload page.

/// HTML served at `/`. Posts the chosen file to `/upload` and shows the
/// returned `cartoon_image` in the preview box, or alerts on failure.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Make this Photo to Cartoon</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            text-align: center;
            margin: 0;
            padding: 0;
            background-color: #f8f9fa;
        }
        .header {
            padding: 10px 20px;
            background-color: #ffffff;
            box-shadow: 0 2px 4px rgba(0, 0, 0, 0.1);
            font-weight: bold;
            text-align: left;
        }
        .content { padding: 20px; }
        .content h1 { font-size: 24px; margin: 20px 0; }
        .content p { font-size: 18px; margin: 10px 0; }
        .highlight {
            background-color: #ffeb3b;
            padding: 2px 6px;
            border-radius: 4px;
        }
        .upload-button {
            display: inline-block;
            background-color: #007bff;
            color: #ffffff;
            border: none;
            padding: 15px 30px;
            font-size: 18px;
            border-radius: 25px;
            margin: 20px 0;
            cursor: pointer;
        }
        .image-preview-box {
            border: 2px dashed #007bff;
            padding: 20px;
            margin: 20px auto;
            max-width: 800px;
            border-radius: 10px;
            background-color: #ffffff;
            display: none;
        }
        .image-preview-box img {
            max-width: 100%;
            border-radius: 10px;
        }
    </style>
</head>
<body>
    <div class="header">Toonwerk</div>
    <div class="content">
        <h1>Make this Photo to Cartoon</h1>
        <p>100% Automatically and <span class="highlight">Free</span></p>
        <form id="uploadForm">
            <input type="file" name="image" accept="image/*" required>
            <select name="mode">
                <option value="edge_mask">Ink outlines</option>
                <option value="smoothed">Smooth colours</option>
            </select>
            <button type="submit" class="upload-button">Upload Image</button>
        </form>
        <div class="image-preview-box" id="imagePreview">
            <img alt="Image preview" id="previewImage" src="">
        </div>
    </div>
    <script>
        document.getElementById('uploadForm').addEventListener('submit', function (event) {
            event.preventDefault();
            fetch('/upload', { method: 'POST', body: new FormData(this) })
                .then(response => response.json())
                .then(data => {
                    if (data.cartoon_image) {
                        document.getElementById('previewImage').src = data.cartoon_image;
                        document.getElementById('imagePreview').style.display = 'block';
                    } else {
                        alert('Image processing failed. Please try again.');
                    }
                })
                .catch(error => console.error('Error:', error));
        });
    </script>
</body>
</html>
"#;
