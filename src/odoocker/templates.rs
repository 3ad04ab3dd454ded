// Built-in template set. Any of these can be shadowed by a `<name>.hbs` file
// in one of the context `template_dirs`.

pub static TEMPLATE_MAIN: &str = r#"FROM {{os_name}}:{{os_release}}
{{#each steps}}

{{step this}}
{{/each}}
"#;

pub static TEMPLATE_SETUP_ENV: &str = r#"# Environment
ARG DEBIAN_FRONTEND=noninteractive
{{#each environments}}
ENV {{@key}}="{{this}}"
{{/each}}
"#;

pub static TEMPLATE_SETUP_BASE_DEPENDENCIES: &str = r#"# Base dependencies
RUN set -x; \
    apt-get update \
    && apt-get install -y --no-install-recommends \
{{#each base_packages}}
        {{this}} \
{{/each}}
{{#each deb_repos}}
{{#if key}}
    && apt-key adv --keyserver hkp://keyserver.ubuntu.com:80 --recv-keys {{key}} \
    && echo "deb {{url}} {{name}} {{repo}}" > /etc/apt/sources.list.d/{{name}}.list \
{{else}}
    && curl -sSL {{key_url}} | apt-key add - \
    && curl -sSL {{list_url}} > /etc/apt/sources.list.d/{{name}}.list \
{{/if}}
    && apt-get update \
    && {{#each environments}}{{@key}}={{this}} {{/each}}apt-get install -y --no-install-recommends{{#each packages}} {{this}}{{/each}} \
{{/each}}
{{#each deb_files}}
    && curl -sSL -o /tmp/{{name}}.deb {{url}} \
    && apt-get install -y --no-install-recommends /tmp/{{name}}.deb \
    && rm -f /tmp/{{name}}.deb \
{{/each}}
    && rm -rf /var/lib/apt/lists/*
"#;

pub static TEMPLATE_SETUP_ODOO: &str = r#"# Odoo
RUN set -x; \
    apt-get update \
    && apt-get install -y --no-install-recommends{{#each odoo_packages}} {{this}}{{/each}} \
{{#if odoo.release}}
    && curl -sSL -o /tmp/odoo.tar.gz https://nightly.odoo.com/{{odoo.version}}/nightly/src/odoo_{{odoo.version}}.{{odoo.release}}.tar.gz \
    && mkdir -p /opt/odoo \
    && tar -xzf /tmp/odoo.tar.gz -C /opt/odoo --strip-components=1 \
    && rm -f /tmp/odoo.tar.gz \
{{else}}
    && git clone --depth 1 --branch {{odoo.ref}} {{odoo.repo}} /opt/odoo \
    && rm -rf /opt/odoo/.git \
{{/if}}
{{#unless (eq odoo.languages "all")}}
    && find /opt/odoo -path '*/i18n/*.po' | grep -v -E '/({{csv_regex odoo.languages}})\.po$' | xargs -r rm -f \
{{/unless}}
    && {{python_bin}} -m pip install --no-cache-dir -r /opt/odoo/requirements.txt \
    && {{python_bin}} -m pip install --no-cache-dir -e /opt/odoo \
{{#if odoo_pip_packages}}
    && {{python_bin}} -m pip install --no-cache-dir{{#each odoo_pip_packages}} {{this}}{{/each}} \
{{/if}}
    && apt-get purge -y{{#each odoo_packages}} {{this}}{{/each}} \
    && apt-get autoremove -y \
    && rm -rf /var/lib/apt/lists/* /root/.cache
"#;

pub static TEMPLATE_PREPARE_USER: &str = r#"# User
RUN groupadd -g {{user.gid}} odoo \
    && useradd -m -d /var/lib/odoo -s /bin/bash -u {{user.uid}} -g {{user.gid}} odoo \
    && mkdir -p /etc/odoo /var/lib/odoo /mnt/addons \
    && touch /etc/odoo/odoo.conf \
    && chown -R odoo:odoo /etc/odoo /var/lib/odoo /mnt/addons
"#;

pub static TEMPLATE_SETUP_LABELS: &str = r#"# Labels
{{#each labels}}
LABEL {{@key}}="{{this}}"
{{/each}}
"#;

pub static TEMPLATE_SETUP_COMMAND: &str = r#"# Command
VOLUME ["/var/lib/odoo", "/mnt/addons"]
EXPOSE 8069 8072
USER odoo
WORKDIR /var/lib/odoo
CMD ["odoo"]
"#;

/// (name, source) of every built-in template.
pub static BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("main", TEMPLATE_MAIN),
    ("setup_env", TEMPLATE_SETUP_ENV),
    ("setup_base_dependencies", TEMPLATE_SETUP_BASE_DEPENDENCIES),
    ("setup_odoo", TEMPLATE_SETUP_ODOO),
    ("prepare_user", TEMPLATE_PREPARE_USER),
    ("setup_labels", TEMPLATE_SETUP_LABELS),
    ("setup_command", TEMPLATE_SETUP_COMMAND),
];
