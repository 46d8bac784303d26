// Gallery page rendering - string-assembled HTML with an inline slideshow
use crate::domain::gallery::SlideRow;
use crate::domain::product::RadarProduct;

/// Everything the gallery page needs: the available products for the
/// navigation list, the selected product, the ordered slide rows, and the
/// display dimensions.
pub struct GalleryView<'a> {
    pub products: &'a [RadarProduct],
    pub active_code: &'a str,
    pub active_label: &'a str,
    pub slides: &'a [SlideRow],
    pub width: u32,
    pub height: u32,
}

const SLIDESHOW_JS: &str = r#"    (function () {
      var root = document.getElementById(gallery.wrapperid);
      if (!root || gallery.imagearray.length === 0) {
        return;
      }

      var img = document.createElement('img');
      img.width = gallery.dimensions[0];
      img.height = gallery.dimensions[1];
      img.style.transition = 'opacity ' + gallery.fadeduration + 'ms';
      img.src = gallery.imagearray[0][0];
      root.appendChild(img);

      var index = 0;
      var cycles = 0;

      function show(i) {
        img.style.opacity = 0;
        setTimeout(function () {
          img.src = gallery.imagearray[i][0];
          img.style.opacity = 1;
        }, gallery.fadeduration);
      }

      function step() {
        if (!gallery.autoplay[0] || cycles >= gallery.autoplay[2]) {
          return;
        }
        index = (index + 1) % gallery.imagearray.length;
        if (index === 0) {
          cycles += 1;
        }
        show(index);
        setTimeout(step, gallery.autoplay[1] + gallery.fadeduration);
      }

      function adjustDelay(delta) {
        var next = gallery.autoplay[1] + delta;
        if (next < 100) {
          next = 100;
        }
        gallery.autoplay[1] = next;
      }

      setTimeout(step, gallery.autoplay[1] + gallery.fadeduration);

      document.getElementById('increase-slide-delay').addEventListener('click', function (e) {
        adjustDelay(100);
        e.preventDefault();
      });
      document.getElementById('decrease-slide-delay').addEventListener('click', function (e) {
        adjustDelay(-100);
        e.preventDefault();
      });

      setInterval(function () {
        document.getElementById('nav_time').textContent = new Date().toUTCString();
      }, 1000);
    })();
"#;

/// Render the full gallery page for an available product.
pub fn render_gallery_page(view: &GalleryView<'_>) -> Result<String, serde_json::Error> {
    let imagearray = serde_json::to_string(view.slides)?;

    let mut html = page_open();

    html.push_str("        <div class=\"sidebar\">\n");
    html.push_str("          <ul class=\"nav-list\">\n");
    html.push_str("            <li class=\"nav-header\">Radar Product</li>\n");
    for product in view.products {
        let class = if product.code == view.active_code {
            " class=\"active\""
        } else {
            ""
        };
        html.push_str(&format!(
            "            <li{}><a href=\"?p={}\">{}</a></li>\n",
            class,
            urlencoding::encode(&product.code),
            html_escape(&product.label)
        ));
    }
    html.push_str("          </ul>\n");
    html.push_str("        </div>\n");

    html.push_str("        <div class=\"content\">\n");
    html.push_str(&format!(
        "          <h2>Radar | <small>{}</small></h2>\n",
        html_escape(view.active_label)
    ));
    html.push_str("          <div class=\"delay-controls\">\n");
    html.push_str("            <h3>Delay</h3>\n");
    html.push_str("            <a class=\"btn\" href=\"#\" id=\"increase-slide-delay\">+</a>\n");
    html.push_str("            <a class=\"btn\" href=\"#\" id=\"decrease-slide-delay\">&minus;</a>\n");
    html.push_str("          </div>\n");
    html.push_str("          <div id=\"radar\"></div>\n");
    html.push_str("        </div>\n");

    html.push_str(PAGE_FOOTER);

    html.push_str("    <script>\n");
    html.push_str("    var gallery = {\n");
    html.push_str("      wrapperid: 'radar',\n");
    html.push_str(&format!(
        "      dimensions: [{}, {}],\n",
        view.width, view.height
    ));
    html.push_str(&format!("      imagearray: {},\n", imagearray));
    html.push_str("      autoplay: [true, 250, 100000],\n");
    html.push_str("      fadeduration: 250\n");
    html.push_str("    };\n");
    html.push_str(SLIDESHOW_JS);
    html.push_str("    </script>\n");
    html.push_str("  </body>\n</html>\n");

    Ok(html)
}

/// Render the page shown when the selected product has no images. No
/// navigation and no slideshow script, just the notice.
pub fn render_unavailable_page() -> String {
    let mut html = page_open();

    html.push_str("        <div class=\"content\">\n");
    html.push_str("          <div class=\"alert\">\n");
    html.push_str(
        "            <strong>We&#39;re sorry!</strong> Radar images are not available at this time.\n",
    );
    html.push_str("          </div>\n");
    html.push_str("        </div>\n");

    html.push_str(PAGE_FOOTER);
    html.push_str("  </body>\n</html>\n");

    html
}

fn page_open() -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html lang=\"en\" dir=\"ltr\">\n");

    html.push_str("  <head>\n");
    html.push_str("    <title>radar-gallery</title>\n");
    html.push_str("    <meta charset=\"utf-8\">\n");
    html.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str("    <style>\n");
    html.push_str("    body { margin: 0; padding-top: 60px; font-family: sans-serif; }\n");
    html.push_str("    .navbar { position: fixed; top: 0; width: 100%; height: 40px; background: #222; color: #eee; }\n");
    html.push_str("    .navbar .brand { margin-left: 16px; line-height: 40px; color: #eee; text-decoration: none; }\n");
    html.push_str("    .navbar #nav_time { float: right; margin: 0 16px; line-height: 40px; }\n");
    html.push_str("    .sidebar { float: left; width: 220px; }\n");
    html.push_str("    .nav-list { list-style: none; padding: 0 8px; }\n");
    html.push_str("    .nav-list .nav-header { font-weight: bold; margin-bottom: 4px; }\n");
    html.push_str("    .nav-list .active a { font-weight: bold; }\n");
    html.push_str("    .content { margin-left: 240px; }\n");
    html.push_str("    .delay-controls .btn { border: 1px solid #ccc; padding: 2px 10px; text-decoration: none; }\n");
    html.push_str("    .alert { background: #d9edf7; padding: 12px; }\n");
    html.push_str("    </style>\n");
    html.push_str("  </head>\n");
    html.push_str("  <body>\n");

    html.push_str("    <div class=\"navbar\">\n");
    html.push_str("      <a class=\"brand\" href=\"#\">radar-gallery</a>\n");
    html.push_str("      <p id=\"nav_time\"></p>\n");
    html.push_str("    </div>\n");

    html.push_str("    <div class=\"container\">\n");
    html.push_str("      <div class=\"row\">\n");

    html
}

const PAGE_FOOTER: &str = "      </div>\n      <hr>\n      <footer>\n        <p>&copy; radar-gallery</p>\n      </footer>\n    </div>\n";

fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
