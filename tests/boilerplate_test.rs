use textdistill::{extract, Focus, Options};

#[test]
fn nav_and_footer_are_removed() {
    let html = r#"<html><body><nav>Menu</nav><article><h1>Breaking News</h1><p>This is the main content of the article. It contains important information that readers want to see.</p><p>Trafilatura automatically removes boilerplate content like navigation, footers, and ads.</p></article><footer>Copyright 2026</footer></body></html>"#;

    let text = extract(html, &Options::default());
    match text {
        Some(text) => {
            assert!(text.contains("Breaking News"));
            assert!(text.contains("main content"));
            assert!(text.contains("automatically removes boilerplate"));
            assert!(!text.contains("Menu"));
            assert!(!text.contains("Copyright 2026"));
        }
        None => panic!("expected Some(_), got None"),
    }
}

#[test]
fn aside_is_excluded_even_inside_article() {
    let html = r#"
        <html><body>
          <article>
            <aside>RELATED_SIDEBAR_TEXT</aside>
            <p>The article body carries real sentences with commas, ordinary words,
            and enough length to pass every minimum threshold in the pipeline.</p>
            <p>A second paragraph keeps the body comfortably above the output
            floor so the extraction result is accepted and returned.</p>
          </article>
        </body></html>
    "#;

    let text = extract(html, &Options::default()).unwrap_or_default();
    assert!(text.contains("real sentences"));
    assert!(!text.contains("RELATED_SIDEBAR_TEXT"));
}

#[test]
fn share_widgets_and_cookie_banners_are_removed() {
    let html = r#"
        <html><body>
          <div class="cookie-consent">COOKIE_BANNER_TEXT</div>
          <article class="article-body">
            <p>Body paragraph number one with plenty of words, commas, and the
            usual run of sentences that genuine articles are made from.</p>
            <div class="social-share">SHARE_WIDGET_TEXT</div>
            <p>Body paragraph number two continues the article and pushes the
            total text volume safely above the extraction thresholds.</p>
          </article>
        </body></html>
    "#;

    let text = extract(html, &Options::default()).unwrap_or_default();
    assert!(text.contains("Body paragraph number one"));
    assert!(text.contains("Body paragraph number two"));
    assert!(!text.contains("SHARE_WIDGET_TEXT"));
    assert!(!text.contains("COOKIE_BANNER_TEXT"));
}

#[test]
fn hidden_elements_are_removed() {
    let html = r#"
        <html><body>
          <article class="post-content">
            <div style="display:none">HIDDEN_INLINE_TEXT</div>
            <div aria-hidden="true">HIDDEN_ARIA_TEXT</div>
            <p>The visible paragraph holds the actual article text, sentence after
            sentence, long enough to clear the minimum output size gate.</p>
            <p>Visible text continues here with further ordinary prose to keep
            the extraction result above every size threshold in play.</p>
          </article>
        </body></html>
    "#;

    let text = extract(html, &Options::default()).unwrap_or_default();
    assert!(text.contains("visible paragraph"));
    assert!(!text.contains("HIDDEN_INLINE_TEXT"));
    assert!(!text.contains("HIDDEN_ARIA_TEXT"));
}

#[test]
fn link_dense_blocks_are_removed() {
    let html = r#"
        <html><body>
          <article class="entry-content">
            <div>
              <a href="/a">NAV_ONE</a> <a href="/b">NAV_TWO</a>
              <a href="/c">NAV_THREE</a> <a href="/d">NAV_FOUR</a>
            </div>
            <p>Paragraph text with no links at all, written plainly and at
            sufficient length that the extractor keeps it in the output.</p>
            <p>More plain paragraph text follows to push the result over the
            minimum size thresholds used by the final gates.</p>
          </article>
        </body></html>
    "#;

    let text = extract(html, &Options::default()).unwrap_or_default();
    assert!(text.contains("no links at all"));
    assert!(!text.contains("NAV_ONE"));
}

#[test]
fn focus_lengths_are_monotonic() {
    let html = r#"
        <html><body>
          <article class="article-content">
            <p>Core article prose, with commas, that every focus mode should keep
            because it is unambiguous body text of substantial length.</p>
            <p>More core prose follows in a second paragraph, again long enough
            that no mode has a reason to drop it from the output.</p>
            <div class="teaser">Borderline teaser block that recall keeps.</div>
          </article>
        </body></html>
    "#;

    let len_of = |focus: Focus| {
        extract(
            html,
            &Options {
                focus,
                ..Options::default()
            },
        )
        .unwrap_or_default()
        .chars()
        .count()
    };

    let precision = len_of(Focus::Precision);
    let balanced = len_of(Focus::Balanced);
    let recall = len_of(Focus::Recall);
    assert!(precision <= balanced, "precision {precision} > balanced {balanced}");
    assert!(balanced <= recall, "balanced {balanced} > recall {recall}");
}
