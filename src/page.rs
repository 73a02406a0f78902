//! The single dashboard page. Controls are populated from `/api/layout`;
//! every control change posts the full control state to `/api/update` and
//! redraws whichever figures come back.

pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>SpaceX Launch Records Dashboard</title>
    <script src="https://cdn.plot.ly/plotly-2.27.0.min.js"></script>
    <style>
        * { box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            padding: 20px;
        }
        h1 { text-align: center; color: #503D36; font-size: 40px; }
        select, input[type=search] {
            width: 100%;
            padding: 8px;
            border: 1px solid #ddd;
            border-radius: 4px;
            font-size: 14px;
        }
        .slider { position: relative; height: 32px; }
        .slider input[type=range] {
            position: absolute;
            width: 100%;
            pointer-events: none;
            background: none;
        }
        .slider input[type=range]::-webkit-slider-thumb { pointer-events: all; }
        .slider input[type=range]::-moz-range-thumb { pointer-events: all; }
        .marks { display: flex; justify-content: space-between; color: #555; font-size: 13px; }
        .status { color: #a00; font-size: 14px; }
    </style>
</head>
<body>
    <h1>SpaceX Launch Records Dashboard</h1>

    <input type="search" id="site-search" placeholder="Select a Launch Site">
    <select id="site-dropdown"></select>
    <br>

    <div id="success-pie-chart"></div>
    <br>

    <p>Payload range (Kg): <span id="payload-value"></span></p>
    <div class="slider" id="payload-slider">
        <input type="range" id="payload-low">
        <input type="range" id="payload-high">
    </div>
    <div class="marks"><span id="mark-min"></span><span id="mark-max"></span></div>
    <br>

    <div id="success-payload-scatter-chart"></div>
    <div class="status" id="status"></div>

    <script>
        const dropdown = document.getElementById('site-dropdown');
        const search = document.getElementById('site-search');
        const low = document.getElementById('payload-low');
        const high = document.getElementById('payload-high');
        let options = [];
        let bounds = null;

        function controlState() {
            return {
                site: dropdown.value,
                payload: [Number(low.value), Number(high.value)]
            };
        }

        function renderOptions(filter) {
            const current = dropdown.value;
            const needle = filter.toLowerCase();
            dropdown.replaceChildren();
            for (const o of options) {
                // The selected site stays listed so the select never goes blank.
                if (o.value === 'ALL' || o.value === current || o.label.toLowerCase().includes(needle)) {
                    dropdown.add(new Option(o.label, o.value));
                }
            }
            if (!current) return;
            dropdown.value = current;
            if (dropdown.value !== current) {
                dropdown.value = 'ALL';
                update('site-dropdown');
            }
        }

        async function update(changed) {
            const body = controlState();
            if (changed) body.changed = changed;
            document.getElementById('payload-value').textContent =
                `${body.payload[0]} - ${body.payload[1]}`;
            try {
                const response = await fetch('/api/update', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify(body)
                });
                if (!response.ok) throw new Error(await response.text());
                const figures = await response.json();
                for (const [id, figure] of Object.entries(figures)) {
                    Plotly.react(id, figure.data, figure.layout, { responsive: true });
                }
                document.getElementById('status').textContent = '';
            } catch (err) {
                console.error('Error:', err);
                document.getElementById('status').textContent = 'Error: ' + err;
            }
        }

        // Native range inputs cannot reach a max that is off the step grid,
        // so snap by hand and let the top end land exactly on max.
        function snap(input) {
            const v = Number(input.value);
            const snapped = bounds.min + Math.round((v - bounds.min) / bounds.step) * bounds.step;
            input.value = v >= bounds.max ? bounds.max : Math.min(snapped, bounds.max);
        }

        function keepOrdered(moved) {
            if (Number(low.value) > Number(high.value)) {
                if (moved === low) low.value = high.value; else high.value = low.value;
            }
        }

        async function init() {
            const response = await fetch('/api/layout');
            const layout = await response.json();

            options = layout.site.options;
            renderOptions('');
            dropdown.value = layout.site.value;
            search.placeholder = layout.site.placeholder;
            search.hidden = !layout.site.searchable;

            const p = layout.payload;
            bounds = p;
            for (const input of [low, high]) {
                input.min = p.min;
                input.max = p.max;
                input.step = 'any';
            }
            low.value = p.value[0];
            high.value = p.value[1];
            document.getElementById('mark-min').textContent = p.marks[0].label;
            document.getElementById('mark-max').textContent = p.marks[1].label;

            await update(null);
        }

        dropdown.addEventListener('change', () => update('site-dropdown'));
        search.addEventListener('input', () => renderOptions(search.value));
        for (const input of [low, high]) {
            input.addEventListener('input', () => { snap(input); keepOrdered(input); });
            input.addEventListener('change', () => update('payload-slider'));
        }
        init();
    </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_options_built_as_elements() {
        assert!(INDEX_HTML.contains("dropdown.add(new Option(o.label, o.value))"));
        assert!(!INDEX_HTML.contains("innerHTML"));
    }

    #[test]
    fn test_search_keeps_current_site() {
        assert!(INDEX_HTML.contains("o.value === current"));
        assert!(INDEX_HTML.contains("dropdown.value = 'ALL';"));
    }
}
